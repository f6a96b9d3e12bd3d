// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process cluster fabric
//!
//! Every node created from the same `MemoryFabric` shares one leader store
//! and one peer group, and owns a private local store. Writes to the leader
//! store are rejected for anyone but the designated leader, mirroring the
//! transport the coordinator runs on in production.

use crate::store::{Cluster, LeaderStore, LocalStore, PeerStore, StoreError};
use async_trait::async_trait;
use ll_core::NodeId;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard};

/// Recorded store call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    LeaderGet { node: NodeId, key: String },
    LeaderSet { node: NodeId, key: String },
    PeerGetAll { node: NodeId, key: String },
    PeerGetOwn { node: NodeId, key: String },
    PeerSet { node: NodeId, key: String },
    LocalGet { node: NodeId, key: String },
    LocalSet { node: NodeId, key: String },
}

/// Store operation that can be made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StoreOp {
    LeaderGet,
    LeaderSet,
    PeerGet,
    PeerSet,
    LocalGet,
    LocalSet,
}

#[derive(Default)]
struct FabricState {
    leader: Option<NodeId>,
    leader_data: BTreeMap<String, String>,
    members: BTreeSet<NodeId>,
    peer_data: BTreeMap<NodeId, BTreeMap<String, String>>,
    local_data: BTreeMap<NodeId, BTreeMap<String, String>>,
    calls: Vec<StoreCall>,
    faults: BTreeSet<StoreOp>,
}

impl FabricState {
    fn check(&self, op: StoreOp) -> Result<(), StoreError> {
        if self.faults.contains(&op) {
            return Err(StoreError::Unavailable(format!("injected fault: {:?}", op)));
        }
        Ok(())
    }
}

/// Shared state behind every node of a simulated cluster
#[derive(Clone, Default)]
pub struct MemoryFabric {
    state: Arc<Mutex<FabricState>>,
}

impl MemoryFabric {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, FabricState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Handle for one node of the cluster
    pub fn node(&self, id: impl Into<String>) -> MemoryNode {
        MemoryNode {
            id: NodeId::new(id),
            fabric: self.clone(),
        }
    }

    /// Designate the elected leader
    pub fn set_leader(&self, id: &NodeId) {
        self.state().leader = Some(id.clone());
    }

    pub fn clear_leader(&self) {
        self.state().leader = None;
    }

    pub fn leader(&self) -> Option<NodeId> {
        self.state().leader.clone()
    }

    /// Add a node to the peer group
    pub fn join(&self, id: &NodeId) {
        self.state().members.insert(id.clone());
    }

    /// Remove a node from the peer group, dropping its row
    pub fn leave(&self, id: &NodeId) {
        let mut state = self.state();
        state.members.remove(id);
        state.peer_data.remove(id);
    }

    pub fn is_member(&self, id: &NodeId) -> bool {
        self.state().members.contains(id)
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<StoreCall> {
        self.state().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    pub fn leader_value(&self, key: &str) -> Option<String> {
        self.state().leader_data.get(key).cloned()
    }

    pub fn peer_value(&self, node: &NodeId, key: &str) -> Option<String> {
        self.state().peer_data.get(node)?.get(key).cloned()
    }

    pub fn local_value(&self, node: &NodeId, key: &str) -> Option<String> {
        self.state().local_data.get(node)?.get(key).cloned()
    }

    /// Overwrite a leader value directly, bypassing the leader check
    pub fn put_leader_value(&self, key: &str, value: &str) {
        self.state()
            .leader_data
            .insert(key.to_string(), value.to_string());
    }

    /// Overwrite a peer row directly
    pub fn put_peer_value(&self, node: &NodeId, key: &str, value: &str) {
        self.state()
            .peer_data
            .entry(node.clone())
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    /// Make every subsequent `op` fail until cleared
    #[cfg(any(test, feature = "test-support"))]
    pub fn fail(&self, op: StoreOp) {
        self.state().faults.insert(op);
    }

    #[cfg(any(test, feature = "test-support"))]
    pub fn clear_faults(&self) {
        self.state().faults.clear();
    }
}

/// One node's view of a `MemoryFabric`
#[derive(Clone)]
pub struct MemoryNode {
    id: NodeId,
    fabric: MemoryFabric,
}

#[async_trait]
impl Cluster for MemoryNode {
    type Leader = MemoryLeaderStore;
    type Peers = MemoryPeerStore;
    type Local = MemoryLocalStore;

    fn local_node(&self) -> NodeId {
        self.id.clone()
    }

    async fn is_leader(&self) -> Result<bool, StoreError> {
        Ok(self.fabric.state().leader.as_ref() == Some(&self.id))
    }

    fn leader_store(&self) -> MemoryLeaderStore {
        MemoryLeaderStore { node: self.clone() }
    }

    fn peer_store(&self) -> Option<MemoryPeerStore> {
        self.fabric
            .is_member(&self.id)
            .then(|| MemoryPeerStore { node: self.clone() })
    }

    fn local_store(&self) -> MemoryLocalStore {
        MemoryLocalStore { node: self.clone() }
    }
}

#[derive(Clone)]
pub struct MemoryLeaderStore {
    node: MemoryNode,
}

#[async_trait]
impl LeaderStore for MemoryLeaderStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut state = self.node.fabric.state();
        state.calls.push(StoreCall::LeaderGet {
            node: self.node.id.clone(),
            key: key.to_string(),
        });
        state.check(StoreOp::LeaderGet)?;
        Ok(state.leader_data.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut state = self.node.fabric.state();
        state.calls.push(StoreCall::LeaderSet {
            node: self.node.id.clone(),
            key: key.to_string(),
        });
        state.check(StoreOp::LeaderSet)?;
        if state.leader.as_ref() != Some(&self.node.id) {
            return Err(StoreError::Rejected(format!(
                "{} is not the leader",
                self.node.id
            )));
        }
        state
            .leader_data
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Clone)]
pub struct MemoryPeerStore {
    node: MemoryNode,
}

impl MemoryPeerStore {
    fn ensure_member(&self, state: &FabricState) -> Result<(), StoreError> {
        if state.members.contains(&self.node.id) {
            Ok(())
        } else {
            Err(StoreError::Unavailable(format!(
                "{} left the peer group",
                self.node.id
            )))
        }
    }
}

#[async_trait]
impl PeerStore for MemoryPeerStore {
    async fn get_own(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut state = self.node.fabric.state();
        state.calls.push(StoreCall::PeerGetOwn {
            node: self.node.id.clone(),
            key: key.to_string(),
        });
        state.check(StoreOp::PeerGet)?;
        self.ensure_member(&state)?;
        Ok(state
            .peer_data
            .get(&self.node.id)
            .and_then(|row| row.get(key))
            .cloned())
    }

    async fn set_own(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut state = self.node.fabric.state();
        state.calls.push(StoreCall::PeerSet {
            node: self.node.id.clone(),
            key: key.to_string(),
        });
        state.check(StoreOp::PeerSet)?;
        self.ensure_member(&state)?;
        state
            .peer_data
            .entry(self.node.id.clone())
            .or_default()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get_all(&self, key: &str) -> Result<BTreeMap<NodeId, String>, StoreError> {
        let mut state = self.node.fabric.state();
        state.calls.push(StoreCall::PeerGetAll {
            node: self.node.id.clone(),
            key: key.to_string(),
        });
        state.check(StoreOp::PeerGet)?;
        self.ensure_member(&state)?;
        Ok(state
            .members
            .iter()
            .filter_map(|member| {
                let value = state.peer_data.get(member)?.get(key)?;
                Some((member.clone(), value.clone()))
            })
            .collect())
    }
}

#[derive(Clone)]
pub struct MemoryLocalStore {
    node: MemoryNode,
}

#[async_trait]
impl LocalStore for MemoryLocalStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut state = self.node.fabric.state();
        state.calls.push(StoreCall::LocalGet {
            node: self.node.id.clone(),
            key: key.to_string(),
        });
        state.check(StoreOp::LocalGet)?;
        Ok(state
            .local_data
            .get(&self.node.id)
            .and_then(|row| row.get(key))
            .cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut state = self.node.fabric.state();
        state.calls.push(StoreCall::LocalSet {
            node: self.node.id.clone(),
            key: key.to_string(),
        });
        state.check(StoreOp::LocalSet)?;
        state
            .local_data
            .entry(self.node.id.clone())
            .or_default()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
