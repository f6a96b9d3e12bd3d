// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lock protocol engine
//!
//! Per (node, lock) the lifecycle is Unrequested -> Requested -> Granted ->
//! Released, repeated across turns. Only the leader decides grants; every
//! decision is a pure function of the ledger, so any process replaying the
//! same persisted state reaches the same answer.

use super::event::LockEvent;
use super::hooks::LockHooks;
use super::ledger::LockLedger;
use super::policy::{GrantPolicies, GrantRequest};
use super::CoordinationError;
use crate::clock::Clock;
use crate::id::{LockName, NodeId};
use crate::timestamp::Timestamp;
use std::sync::Arc;

pub struct LockEngine<K: Clock> {
    ledger: LockLedger,
    leader: bool,
    policies: Arc<GrantPolicies>,
    hooks: Arc<dyn LockHooks>,
    clock: K,
    events: Vec<LockEvent>,
}

impl<K: Clock> LockEngine<K> {
    pub fn new(
        ledger: LockLedger,
        leader: bool,
        policies: Arc<GrantPolicies>,
        hooks: Arc<dyn LockHooks>,
        clock: K,
    ) -> Self {
        Self {
            ledger,
            leader,
            policies,
            hooks,
            clock,
            events: Vec::new(),
        }
    }

    pub fn is_leader(&self) -> bool {
        self.leader
    }

    pub fn local_node(&self) -> &NodeId {
        self.ledger.local_node()
    }

    pub fn ledger(&self) -> &LockLedger {
        &self.ledger
    }

    /// Take the events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<LockEvent> {
        std::mem::take(&mut self.events)
    }

    /// Request `lock` and report whether it is held.
    ///
    /// Repeated calls keep the original request timestamp. A leader decides
    /// its own request immediately; anyone else has to wait for a later turn.
    pub fn acquire(&mut self, lock: &LockName) -> Result<bool, CoordinationError> {
        let (timestamp, created) = self.ledger.request(lock, &self.clock);
        if created {
            tracing::debug!(node = %self.local_node(), %lock, %timestamp, "lock requested");
            self.events.push(LockEvent::Requested {
                lock: lock.clone(),
                timestamp,
            });
        }

        if self.ledger.is_granted(lock) {
            return Ok(true);
        }
        if self.leader {
            let node = self.local_node().clone();
            return self.grant(lock, &node);
        }
        Ok(false)
    }

    pub fn granted(&self, lock: &LockName) -> bool {
        self.ledger.is_granted(lock)
    }

    pub fn requested(&self, lock: &LockName) -> bool {
        self.ledger.is_requested(lock)
    }

    pub fn request_timestamp(&self, lock: &LockName) -> Option<&Timestamp> {
        self.ledger.request_timestamp(lock)
    }

    /// Nodes holding a valid grant for `lock`, in identity order
    pub fn holders(&self, lock: &LockName) -> Vec<NodeId> {
        self.ledger
            .grants()
            .iter()
            .filter(|(node, row)| row.contains_key(lock) && self.ledger.is_granted_to(node, lock))
            .map(|(node, _)| node.clone())
            .collect()
    }

    /// Nodes waiting for `lock`, ordered by request timestamp then identity
    pub fn queue(&self, lock: &LockName) -> Vec<NodeId> {
        let holders = self.holders(lock);
        self.queue_excluding(lock, &holders)
    }

    fn queue_excluding(&self, lock: &LockName, holders: &[NodeId]) -> Vec<NodeId> {
        let mut waiting: Vec<(&Timestamp, &NodeId)> = self
            .ledger
            .requests()
            .iter()
            .filter(|(node, _)| !holders.contains(node))
            .filter_map(|(node, row)| row.get(lock).map(|timestamp| (timestamp, node)))
            .collect();
        waiting.sort();
        waiting.into_iter().map(|(_, node)| node.clone()).collect()
    }

    /// Decide whether `node` may hold `lock`, recording the grant if so.
    pub fn grant(&mut self, lock: &LockName, node: &NodeId) -> Result<bool, CoordinationError> {
        if !self.leader {
            return Err(CoordinationError::NotLeader {
                operation: "grant",
                node: self.local_node().clone(),
            });
        }
        if self.ledger.is_granted_to(node, lock) {
            return Ok(true);
        }

        let granted = self.holders(lock);
        let queue = self.queue_excluding(lock, &granted);
        if !queue.contains(node) {
            return Ok(false);
        }

        let request = GrantRequest {
            lock,
            node,
            granted: &granted,
            queue: &queue,
        };
        if !self.policies.for_lock(lock).should_grant(&request) {
            tracing::trace!(%node, %lock, holders = granted.len(), waiting = queue.len(), "grant deferred");
            return Ok(false);
        }

        let Some(timestamp) = self.ledger.request_timestamp_of(node, lock).cloned() else {
            return Ok(false);
        };
        // An old grant for a previous request is superseded
        if let Some(stale) = self.ledger.remove_grant(node, lock) {
            self.revoked(node, lock, stale);
        }
        self.ledger.record_grant(node, lock, timestamp.clone());

        tracing::info!(%node, %lock, %timestamp, "leader grants lock");
        self.hooks.granted(node, lock, &timestamp);
        self.events.push(LockEvent::Granted {
            node: node.clone(),
            lock: lock.clone(),
            timestamp,
        });
        Ok(true)
    }

    /// Leader-only pass: revoke stale grants, then decide every outstanding
    /// request in queue order.
    pub fn run_leader_pass(&mut self) -> Result<(), CoordinationError> {
        if !self.leader {
            return Err(CoordinationError::NotLeader {
                operation: "leader pass",
                node: self.local_node().clone(),
            });
        }

        for (node, lock) in self.ledger.stale_grants() {
            if let Some(timestamp) = self.ledger.remove_grant(&node, &lock) {
                self.revoked(&node, &lock, timestamp);
            }
        }

        let mut outstanding: Vec<(LockName, Timestamp, NodeId)> = self
            .ledger
            .requests()
            .iter()
            .flat_map(|(node, row)| {
                row.iter()
                    .map(move |(lock, ts)| (lock.clone(), ts.clone(), node.clone()))
            })
            .collect();
        outstanding.sort();

        for (lock, _, node) in outstanding {
            self.grant(&lock, &node)?;
        }
        Ok(())
    }

    /// Drop this node's requests for every lock it holds. Called once, at
    /// the end of the turn.
    pub fn release_granted(&mut self) -> Vec<LockName> {
        let released = self.ledger.release_granted();
        let node = self.local_node().clone();
        released
            .into_iter()
            .map(|(lock, timestamp)| {
                tracing::info!(%node, %lock, "released local lock");
                self.events.push(LockEvent::Released {
                    lock: lock.clone(),
                    timestamp,
                });
                lock
            })
            .collect()
    }

    /// Log this node's view of its own locks
    pub fn emit_state(&self) {
        let node = self.local_node();
        for lock in self.ledger.local_requests().keys() {
            if self.granted(lock) {
                tracing::debug!(%node, %lock, "granted");
            } else {
                let position = self.queue(lock).iter().position(|n| n == node);
                tracing::debug!(%node, %lock, ?position, "waiting");
            }
        }
    }

    fn revoked(&mut self, node: &NodeId, lock: &LockName, timestamp: Timestamp) {
        match timestamp.to_datetime() {
            Ok(granted_at) => {
                let held = self.clock.now() - granted_at;
                tracing::info!(
                    %node,
                    %lock,
                    held_ms = held.num_milliseconds(),
                    "leader released lock"
                );
            }
            Err(e) => tracing::warn!(%node, %lock, error = %e, "leader released lock"),
        }
        self.hooks.released(node, lock, &timestamp);
        self.events.push(LockEvent::Revoked {
            node: node.clone(),
            lock: lock.clone(),
            timestamp,
        });
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
