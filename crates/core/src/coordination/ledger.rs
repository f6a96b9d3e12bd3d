// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Turn-scoped request/grant ledger
//!
//! Holds who has asked for which lock (requests) and who the leader has
//! granted which lock to (grants). Loaded once at the start of a turn and
//! flushed at the end. A grant only counts while its timestamp equals the
//! timestamp of the node's outstanding request for the same lock.

use crate::clock::Clock;
use crate::id::{LockName, NodeId};
use crate::timestamp::Timestamp;
use std::collections::BTreeMap;

/// One node's locks and their request timestamps
pub type LockRow = BTreeMap<LockName, Timestamp>;

/// Every node's row, keyed by node identity
pub type LockTable = BTreeMap<NodeId, LockRow>;

#[derive(Clone, Debug)]
pub struct LockLedger {
    local: NodeId,
    requests: LockTable,
    grants: LockTable,
}

impl LockLedger {
    pub fn new(local: NodeId, requests: LockTable, grants: LockTable) -> Self {
        Self {
            local,
            requests,
            grants,
        }
    }

    pub fn empty(local: NodeId) -> Self {
        Self::new(local, LockTable::new(), LockTable::new())
    }

    /// Identity of the node this ledger belongs to
    pub fn local_node(&self) -> &NodeId {
        &self.local
    }

    pub fn requests(&self) -> &LockTable {
        &self.requests
    }

    pub fn grants(&self) -> &LockTable {
        &self.grants
    }

    /// This node's own request row
    pub fn local_requests(&self) -> LockRow {
        self.requests.get(&self.local).cloned().unwrap_or_default()
    }

    /// Ensure this node has an outstanding request for `lock`.
    ///
    /// Returns the timestamp of the request and whether it was created now.
    pub fn request(&mut self, lock: &LockName, clock: &impl Clock) -> (Timestamp, bool) {
        let row = self.requests.entry(self.local.clone()).or_default();
        if let Some(existing) = row.get(lock) {
            return (existing.clone(), false);
        }
        let timestamp = clock.timestamp();
        row.insert(lock.clone(), timestamp.clone());
        (timestamp, true)
    }

    pub fn is_requested(&self, lock: &LockName) -> bool {
        self.request_timestamp(lock).is_some()
    }

    pub fn is_granted(&self, lock: &LockName) -> bool {
        self.is_granted_to(&self.local, lock)
    }

    pub fn request_timestamp(&self, lock: &LockName) -> Option<&Timestamp> {
        self.request_timestamp_of(&self.local, lock)
    }

    pub fn request_timestamp_of(&self, node: &NodeId, lock: &LockName) -> Option<&Timestamp> {
        self.requests.get(node)?.get(lock)
    }

    pub fn grant_timestamp_of(&self, node: &NodeId, lock: &LockName) -> Option<&Timestamp> {
        self.grants.get(node)?.get(lock)
    }

    /// True iff `node` holds a grant matching its outstanding request
    pub fn is_granted_to(&self, node: &NodeId, lock: &LockName) -> bool {
        match (
            self.request_timestamp_of(node, lock),
            self.grant_timestamp_of(node, lock),
        ) {
            (Some(requested), Some(granted)) => requested == granted,
            _ => false,
        }
    }

    /// Grant entries whose timestamp no longer matches an outstanding request
    pub fn stale_grants(&self) -> Vec<(NodeId, LockName)> {
        self.grants
            .iter()
            .flat_map(|(node, row)| row.keys().map(move |lock| (node, lock)))
            .filter(|(node, lock)| !self.is_granted_to(node, lock))
            .map(|(node, lock)| (node.clone(), lock.clone()))
            .collect()
    }

    pub(crate) fn record_grant(&mut self, node: &NodeId, lock: &LockName, timestamp: Timestamp) {
        self.grants
            .entry(node.clone())
            .or_default()
            .insert(lock.clone(), timestamp);
    }

    pub(crate) fn remove_grant(&mut self, node: &NodeId, lock: &LockName) -> Option<Timestamp> {
        let row = self.grants.get_mut(node)?;
        let removed = row.remove(lock);
        if row.is_empty() {
            self.grants.remove(node);
        }
        removed
    }

    /// Drop this node's request for every lock it currently holds.
    ///
    /// Grants are left untouched; the leader revokes them on its next pass
    /// once it sees the request gone.
    pub fn release_granted(&mut self) -> Vec<(LockName, Timestamp)> {
        let held: Vec<LockName> = self
            .requests
            .get(&self.local)
            .map(|row| {
                row.keys()
                    .filter(|lock| self.is_granted(lock))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        let mut released = Vec::with_capacity(held.len());
        if let Some(row) = self.requests.get_mut(&self.local) {
            for lock in held {
                if let Some(timestamp) = row.remove(&lock) {
                    released.push((lock, timestamp));
                }
            }
        }
        released
    }
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;
