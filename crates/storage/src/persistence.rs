// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Turn-scoped access to the leader, peer and local tiers
//!
//! A `TurnStorage` is opened once at the start of each turn. Whether the node
//! had joined a peer group at that moment decides where requests are read
//! from and written back to for the rest of the turn.

use crate::codec::{decode_row, decode_table, encode_row, encode_table};
use crate::error::StorageError;
use ll_adapters::{Cluster, LeaderStore, LocalStore, PeerStore};
use ll_core::{LockRow, LockTable, NodeId};

/// Where this turn's requests live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestTier {
    /// Shared peer group: every node's row is visible
    Peer,
    /// No peer group yet: only this node's own requests
    Local,
}

impl std::fmt::Display for RequestTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestTier::Peer => write!(f, "peer"),
            RequestTier::Local => write!(f, "local"),
        }
    }
}

pub struct TurnStorage<C: Cluster> {
    node: NodeId,
    key: String,
    leader: bool,
    leader_store: C::Leader,
    peers: Option<C::Peers>,
    local: C::Local,
}

impl<C: Cluster> TurnStorage<C> {
    /// Bind to the cluster's stores for one turn, resolving leadership once
    pub async fn open(cluster: &C, key: impl Into<String>) -> Result<Self, StorageError> {
        let storage = Self {
            node: cluster.local_node(),
            key: key.into(),
            leader: cluster.is_leader().await?,
            leader_store: cluster.leader_store(),
            peers: cluster.peer_store(),
            local: cluster.local_store(),
        };
        tracing::trace!(
            node = %storage.node,
            key = %storage.key,
            leader = storage.leader,
            tier = %storage.tier(),
            "storage opened"
        );
        Ok(storage)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Leadership as resolved at open
    pub fn is_leader(&self) -> bool {
        self.leader
    }

    pub fn tier(&self) -> RequestTier {
        if self.peers.is_some() {
            RequestTier::Peer
        } else {
            RequestTier::Local
        }
    }

    /// Read the leader's grant map; absent means no grants
    pub async fn load_grants(&self) -> Result<LockTable, StorageError> {
        match self.leader_store.get(&self.key).await? {
            Some(raw) => decode_table(&self.key, &raw),
            None => Ok(LockTable::new()),
        }
    }

    /// Read every visible node's requests
    pub async fn load_requests(&self) -> Result<LockTable, StorageError> {
        let mut requests = LockTable::new();
        match &self.peers {
            Some(peers) => {
                for (node, raw) in peers.get_all(&self.key).await? {
                    let row = decode_row(&format!("{}@{}", self.key, node), &raw)?;
                    requests.insert(node, row);
                }
            }
            None => {
                if let Some(raw) = self.local.get(&self.key).await? {
                    requests.insert(self.node.clone(), decode_row(&self.key, &raw)?);
                }
            }
        }
        Ok(requests)
    }

    /// Write this node's own requests to the tier they were loaded from
    pub async fn save_requests(&self, row: &LockRow) -> Result<(), StorageError> {
        let raw = encode_row(row)?;
        match &self.peers {
            Some(peers) => peers.set_own(&self.key, &raw).await?,
            None => self.local.set(&self.key, &raw).await?,
        }
        Ok(())
    }

    /// Publish the full grant map. Only the leader may call this.
    pub async fn save_grants(&self, grants: &LockTable) -> Result<(), StorageError> {
        if !self.leader {
            return Err(StorageError::NotLeader {
                node: self.node.clone(),
            });
        }
        let raw = encode_table(grants)?;
        self.leader_store.set(&self.key, &raw).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "persistence_tests.rs"]
mod tests;
