// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One coordinator per storage key, shared by every caller in the process

use crate::config::CoordinatorConfig;
use crate::coordinator::Coordinator;
use ll_adapters::Cluster;
use ll_core::{Clock, SystemClock};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

pub type SharedCoordinator<C, K = SystemClock> = Arc<tokio::sync::Mutex<Coordinator<C, K>>>;

pub struct CoordinatorRegistry<C: Cluster, K: Clock = SystemClock> {
    cluster: C,
    clock: K,
    entries: Mutex<HashMap<String, Entry<C, K>>>,
}

struct Entry<C: Cluster, K: Clock> {
    config: CoordinatorConfig,
    coordinator: SharedCoordinator<C, K>,
}

impl<C: Cluster> CoordinatorRegistry<C, SystemClock> {
    pub fn new(cluster: C) -> Self {
        Self::with_clock(cluster, SystemClock)
    }
}

impl<C: Cluster, K: Clock> CoordinatorRegistry<C, K> {
    pub fn with_clock(cluster: C, clock: K) -> Self {
        Self {
            cluster,
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Entry<C, K>>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// The coordinator for `config.key()`, created on first use.
    ///
    /// A later config for the same key does not replace the first one.
    pub fn get_or_create(&self, config: CoordinatorConfig) -> SharedCoordinator<C, K> {
        let key = config.key();
        let mut entries = self.entries();
        if let Some(entry) = entries.get(&key) {
            if entry.config != config {
                tracing::warn!(%key, "coordinator already registered with a different config");
            }
            return entry.coordinator.clone();
        }

        tracing::debug!(%key, node = %self.cluster.local_node(), "coordinator created");
        let coordinator = Arc::new(tokio::sync::Mutex::new(Coordinator::with_clock(
            self.cluster.clone(),
            config.clone(),
            self.clock.clone(),
        )));
        entries.insert(
            key,
            Entry {
                config,
                coordinator: coordinator.clone(),
            },
        );
        coordinator
    }

    pub fn get(&self, key: &str) -> Option<SharedCoordinator<C, K>> {
        self.entries().get(key).map(|entry| entry.coordinator.clone())
    }

    /// Registered keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries().keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
