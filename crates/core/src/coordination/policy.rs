// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Grant policies
//!
//! A policy decides whether a node with an outstanding request may join the
//! set of holders of a lock. Policies are registered per lock name with a
//! default for every lock that has no entry.

use crate::id::{LockName, NodeId};
use std::collections::HashMap;
use std::sync::Arc;

/// Inputs to a grant decision
#[derive(Clone, Copy, Debug)]
pub struct GrantRequest<'a> {
    pub lock: &'a LockName,
    /// Node asking for the lock
    pub node: &'a NodeId,
    /// Nodes currently holding a valid grant, excluding `node`
    pub granted: &'a [NodeId],
    /// Waiting nodes ordered by request timestamp, ties by identity
    pub queue: &'a [NodeId],
}

impl GrantRequest<'_> {
    /// Position of the requesting node in the queue
    pub fn position(&self) -> Option<usize> {
        self.queue.iter().position(|n| n == self.node)
    }
}

pub trait GrantPolicy: Send + Sync {
    fn should_grant(&self, request: &GrantRequest<'_>) -> bool;
}

impl<F> GrantPolicy for F
where
    F: Fn(&GrantRequest<'_>) -> bool + Send + Sync,
{
    fn should_grant(&self, request: &GrantRequest<'_>) -> bool {
        self(request)
    }
}

/// Grant every outstanding request
#[derive(Clone, Copy, Debug, Default)]
pub struct Permissive;

impl GrantPolicy for Permissive {
    fn should_grant(&self, _request: &GrantRequest<'_>) -> bool {
        true
    }
}

/// Single holder, strict first-come first-served
#[derive(Clone, Copy, Debug, Default)]
pub struct Serial;

impl GrantPolicy for Serial {
    fn should_grant(&self, request: &GrantRequest<'_>) -> bool {
        request.granted.is_empty() && request.queue.first() == Some(request.node)
    }
}

/// Up to `max_holders` simultaneous holders, granted in queue order
#[derive(Clone, Copy, Debug)]
pub struct Concurrent {
    pub max_holders: usize,
}

impl Concurrent {
    pub fn new(max_holders: usize) -> Self {
        Self { max_holders }
    }
}

impl GrantPolicy for Concurrent {
    fn should_grant(&self, request: &GrantRequest<'_>) -> bool {
        let free = self.max_holders.saturating_sub(request.granted.len());
        request.position().is_some_and(|pos| pos < free)
    }
}

/// Policy registry: a default plus per-lock overrides
#[derive(Clone)]
pub struct GrantPolicies {
    default: Arc<dyn GrantPolicy>,
    overrides: HashMap<LockName, Arc<dyn GrantPolicy>>,
}

impl GrantPolicies {
    pub fn new(default: impl GrantPolicy + 'static) -> Self {
        Self {
            default: Arc::new(default),
            overrides: HashMap::new(),
        }
    }

    pub fn serial() -> Self {
        Self::new(Serial)
    }

    pub fn permissive() -> Self {
        Self::new(Permissive)
    }

    /// Register a policy for one lock, replacing any previous entry
    pub fn set(&mut self, lock: impl Into<LockName>, policy: impl GrantPolicy + 'static) {
        self.overrides.insert(lock.into(), Arc::new(policy));
    }

    pub fn with(mut self, lock: impl Into<LockName>, policy: impl GrantPolicy + 'static) -> Self {
        self.set(lock, policy);
        self
    }

    /// Drop a per-lock override so the default applies again
    pub fn remove(&mut self, lock: &LockName) -> bool {
        self.overrides.remove(lock).is_some()
    }

    pub fn has_override(&self, lock: &LockName) -> bool {
        self.overrides.contains_key(lock)
    }

    pub fn for_lock(&self, lock: &LockName) -> &dyn GrantPolicy {
        self.overrides
            .get(lock)
            .map(|p| p.as_ref())
            .unwrap_or_else(|| self.default.as_ref())
    }
}

impl Default for GrantPolicies {
    fn default() -> Self {
        Self::serial()
    }
}

impl std::fmt::Debug for GrantPolicies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut locks: Vec<_> = self.overrides.keys().map(|l| l.as_str()).collect();
        locks.sort_unstable();
        f.debug_struct("GrantPolicies")
            .field("overrides", &locks)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "policy_tests.rs"]
mod tests;
