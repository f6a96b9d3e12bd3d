// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced store wrappers for consistent observability

use crate::store::{Cluster, LeaderStore, LocalStore, PeerStore, StoreError};
use async_trait::async_trait;
use ll_core::NodeId;
use std::collections::BTreeMap;
use tracing::Instrument;

/// Wrapper that adds tracing to any store tier
#[derive(Clone)]
pub struct Traced<S> {
    inner: S,
    node: NodeId,
    tier: &'static str,
}

impl<S> Traced<S> {
    pub fn new(inner: S, node: NodeId, tier: &'static str) -> Self {
        Self { inner, node, tier }
    }
}

fn log_read<T>(result: &Result<Option<T>, StoreError>) {
    match result {
        Ok(value) => tracing::debug!(found = value.is_some(), "read"),
        Err(e) => tracing::error!(error = %e, "read failed"),
    }
}

fn log_write(result: &Result<(), StoreError>, len: usize) {
    match result {
        Ok(()) => tracing::debug!(len, "written"),
        Err(e) => tracing::error!(error = %e, "write failed"),
    }
}

#[async_trait]
impl<S: LeaderStore> LeaderStore for Traced<S> {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let span = tracing::info_span!("store.get", tier = self.tier, node = %self.node, key);
        let result = self.inner.get(key).instrument(span.clone()).await;
        span.in_scope(|| log_read(&result));
        result
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let span = tracing::info_span!("store.set", tier = self.tier, node = %self.node, key);
        let result = self.inner.set(key, value).instrument(span.clone()).await;
        span.in_scope(|| log_write(&result, value.len()));
        result
    }
}

#[async_trait]
impl<S: LocalStore> LocalStore for Traced<S> {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let span = tracing::info_span!("store.get", tier = self.tier, node = %self.node, key);
        let result = self.inner.get(key).instrument(span.clone()).await;
        span.in_scope(|| log_read(&result));
        result
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let span = tracing::info_span!("store.set", tier = self.tier, node = %self.node, key);
        let result = self.inner.set(key, value).instrument(span.clone()).await;
        span.in_scope(|| log_write(&result, value.len()));
        result
    }
}

#[async_trait]
impl<S: PeerStore> PeerStore for Traced<S> {
    async fn get_own(&self, key: &str) -> Result<Option<String>, StoreError> {
        let span = tracing::info_span!("store.get_own", tier = self.tier, node = %self.node, key);
        let result = self.inner.get_own(key).instrument(span.clone()).await;
        span.in_scope(|| log_read(&result));
        result
    }

    async fn set_own(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let span = tracing::info_span!("store.set_own", tier = self.tier, node = %self.node, key);
        let result = self.inner.set_own(key, value).instrument(span.clone()).await;
        span.in_scope(|| log_write(&result, value.len()));
        result
    }

    async fn get_all(&self, key: &str) -> Result<BTreeMap<NodeId, String>, StoreError> {
        let span = tracing::info_span!("store.get_all", tier = self.tier, node = %self.node, key);
        let result = self.inner.get_all(key).instrument(span.clone()).await;
        span.in_scope(|| match &result {
            Ok(rows) => tracing::debug!(rows = rows.len(), "read"),
            Err(e) => tracing::error!(error = %e, "read failed"),
        });
        result
    }
}

/// Wrapper that adds tracing to every store of a `Cluster`
#[derive(Clone)]
pub struct TracedCluster<C> {
    inner: C,
}

impl<C> TracedCluster<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

#[async_trait]
impl<C: Cluster> Cluster for TracedCluster<C> {
    type Leader = Traced<C::Leader>;
    type Peers = Traced<C::Peers>;
    type Local = Traced<C::Local>;

    fn local_node(&self) -> NodeId {
        self.inner.local_node()
    }

    async fn is_leader(&self) -> Result<bool, StoreError> {
        let result = self.inner.is_leader().await;
        tracing::trace!(node = %self.inner.local_node(), leader = ?result.as_ref().ok(), "checked leadership");
        result
    }

    fn leader_store(&self) -> Self::Leader {
        Traced::new(self.inner.leader_store(), self.local_node(), "leader")
    }

    fn peer_store(&self) -> Option<Self::Peers> {
        let peers = self.inner.peer_store();
        if peers.is_none() {
            tracing::debug!(node = %self.local_node(), "no peer group joined");
        }
        peers.map(|p| Traced::new(p, self.local_node(), "peer"))
    }

    fn local_store(&self) -> Self::Local {
        Traced::new(self.inner.local_store(), self.local_node(), "local")
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
