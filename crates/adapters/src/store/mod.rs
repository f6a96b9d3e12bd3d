// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Store traits supplied by the embedding system
//!
//! Three tiers, all holding opaque string values under string keys:
//! - **Leader store** - written only by the elected leader, readable by all
//! - **Peer store** - every node writes its own row and reads everyone's
//! - **Local store** - single-node fallback used until a peer group exists

use async_trait::async_trait;
use ll_core::NodeId;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors from store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("write rejected: {0}")]
    Rejected(String),
}

/// Leader-writable, globally readable key/value store
#[async_trait]
pub trait LeaderStore: Clone + Send + Sync + 'static {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Per-node-writable, all-readable store
#[async_trait]
pub trait PeerStore: Clone + Send + Sync + 'static {
    /// Read this node's own row
    async fn get_own(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write this node's own row
    async fn set_own(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Read every member's row, this node's included
    async fn get_all(&self, key: &str) -> Result<BTreeMap<NodeId, String>, StoreError>;
}

/// Single-node persistence
#[async_trait]
pub trait LocalStore: Clone + Send + Sync + 'static {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Everything a node needs from its environment
#[async_trait]
pub trait Cluster: Clone + Send + Sync + 'static {
    type Leader: LeaderStore;
    type Peers: PeerStore;
    type Local: LocalStore;

    /// Stable identity of this node
    fn local_node(&self) -> NodeId;

    /// Whether this node currently holds the elected-leader role
    async fn is_leader(&self) -> Result<bool, StoreError>;

    fn leader_store(&self) -> Self::Leader;

    /// `None` until the node has joined a peer group
    fn peer_store(&self) -> Option<Self::Peers>;

    fn local_store(&self) -> Self::Local;
}
