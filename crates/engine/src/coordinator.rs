// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Turn-scoped lock coordinator

use crate::config::CoordinatorConfig;
use crate::error::CoordinatorError;
use ll_adapters::Cluster;
use ll_core::{
    Clock, GrantPolicies, GrantPolicy, LockApi, LockEngine, LockEvent, LockHooks, LockLedger,
    LockName, NodeId, NoopHooks, SystemClock, Timestamp,
};
use ll_storage::{RequestTier, TurnStorage};
use std::sync::Arc;

/// What happened during one turn
#[derive(Debug, Clone)]
pub struct TurnReport {
    pub node: NodeId,
    pub leader: bool,
    pub tier: RequestTier,
    /// Locks this node gave up at the end of the turn
    pub released: Vec<LockName>,
    pub events: Vec<LockEvent>,
}

impl TurnReport {
    /// Grants issued by this node as leader
    pub fn grants_issued(&self) -> Vec<(&NodeId, &LockName)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                LockEvent::Granted { node, lock, .. } => Some((node, lock)),
                _ => None,
            })
            .collect()
    }

    /// Grants revoked by this node as leader
    pub fn grants_revoked(&self) -> Vec<(&NodeId, &LockName)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                LockEvent::Revoked { node, lock, .. } => Some((node, lock)),
                _ => None,
            })
            .collect()
    }
}

struct Turn<C: Cluster, K: Clock> {
    storage: TurnStorage<C>,
    engine: LockEngine<K>,
}

pub struct Coordinator<C: Cluster, K: Clock = SystemClock> {
    cluster: C,
    clock: K,
    config: CoordinatorConfig,
    policies: Arc<GrantPolicies>,
    hooks: Arc<dyn LockHooks>,
    turn: Option<Turn<C, K>>,
}

impl<C: Cluster> Coordinator<C, SystemClock> {
    pub fn new(cluster: C, config: CoordinatorConfig) -> Self {
        Self::with_clock(cluster, config, SystemClock)
    }
}

impl<C: Cluster, K: Clock> Coordinator<C, K> {
    pub fn with_clock(cluster: C, config: CoordinatorConfig, clock: K) -> Self {
        let policies = Arc::new(config.policies());
        Self {
            cluster,
            clock,
            config,
            policies,
            hooks: Arc::new(NoopHooks),
            turn: None,
        }
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn LockHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    /// Register a grant policy for one lock. Takes effect from the next turn.
    pub fn set_policy(&mut self, lock: impl Into<LockName>, policy: impl GrantPolicy + 'static) {
        Arc::make_mut(&mut self.policies).set(lock, policy);
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    pub fn key(&self) -> String {
        self.config.key()
    }

    pub fn local_node(&self) -> NodeId {
        self.cluster.local_node()
    }

    pub fn in_turn(&self) -> bool {
        self.turn.is_some()
    }

    /// Load grants and requests and open a turn.
    ///
    /// A leader decides every outstanding request here, so grants it issues
    /// to itself are visible to `granted` for the rest of the turn.
    pub async fn begin_turn(&mut self) -> Result<(), CoordinatorError> {
        if self.turn.is_some() {
            return Err(CoordinatorError::TurnInProgress);
        }

        let storage = TurnStorage::open(&self.cluster, self.config.key()).await?;
        let grants = storage.load_grants().await?;
        let requests = storage.load_requests().await?;

        let node = self.cluster.local_node();
        let leader = storage.is_leader();
        tracing::debug!(
            %node,
            leader,
            tier = %storage.tier(),
            peers = requests.len(),
            "turn started"
        );

        let ledger = LockLedger::new(node, requests, grants);
        let mut engine = LockEngine::new(
            ledger,
            leader,
            self.policies.clone(),
            self.hooks.clone(),
            self.clock.clone(),
        );
        if leader {
            engine.run_leader_pass()?;
        }
        engine.emit_state();
        self.turn = Some(Turn { storage, engine });
        Ok(())
    }

    /// Persist grants (leader only), release held locks, persist requests.
    ///
    /// The turn is closed even if persisting fails; nothing from it is kept.
    pub async fn end_turn(&mut self) -> Result<TurnReport, CoordinatorError> {
        let Some(mut turn) = self.turn.take() else {
            return Err(CoordinatorError::NoActiveTurn);
        };

        let leader = turn.engine.is_leader();
        if leader {
            turn.storage.save_grants(turn.engine.ledger().grants()).await?;
        }

        // The release must reach the request row, or the lock would be
        // observed as held again next turn.
        let released = turn.engine.release_granted();
        turn.storage
            .save_requests(&turn.engine.ledger().local_requests())
            .await?;

        let report = TurnReport {
            node: turn.engine.local_node().clone(),
            leader,
            tier: turn.storage.tier(),
            released,
            events: turn.engine.drain_events(),
        };
        tracing::debug!(
            node = %report.node,
            released = report.released.len(),
            events = report.events.len(),
            "turn ended"
        );
        Ok(report)
    }

    /// Drop the open turn without persisting anything
    pub fn abandon_turn(&mut self) -> bool {
        let abandoned = self.turn.take().is_some();
        if abandoned {
            tracing::warn!(node = %self.cluster.local_node(), "turn abandoned, state not persisted");
        }
        abandoned
    }

    /// Run `f` inside a turn. An error from `f` abandons the turn.
    pub async fn run_turn<F, R>(&mut self, f: F) -> Result<(R, TurnReport), CoordinatorError>
    where
        F: FnOnce(&mut Self) -> Result<R, CoordinatorError>,
    {
        self.begin_turn().await?;
        match f(self) {
            Ok(value) => {
                let report = self.end_turn().await?;
                Ok((value, report))
            }
            Err(e) => {
                self.abandon_turn();
                Err(e)
            }
        }
    }

    fn engine(&self) -> Result<&LockEngine<K>, CoordinatorError> {
        self.turn
            .as_ref()
            .map(|turn| &turn.engine)
            .ok_or(CoordinatorError::NoActiveTurn)
    }

    fn engine_mut(&mut self) -> Result<&mut LockEngine<K>, CoordinatorError> {
        self.turn
            .as_mut()
            .map(|turn| &mut turn.engine)
            .ok_or(CoordinatorError::NoActiveTurn)
    }

    /// Leadership as resolved at the start of the turn
    pub fn is_leader(&self) -> Result<bool, CoordinatorError> {
        Ok(self.engine()?.is_leader())
    }

    /// Request `lock`; true if it is held now
    pub fn acquire(&mut self, lock: impl Into<LockName>) -> Result<bool, CoordinatorError> {
        let lock = lock.into();
        Ok(self.engine_mut()?.acquire(&lock)?)
    }

    pub fn granted(&self, lock: impl Into<LockName>) -> Result<bool, CoordinatorError> {
        Ok(self.engine()?.granted(&lock.into()))
    }

    pub fn requested(&self, lock: impl Into<LockName>) -> Result<bool, CoordinatorError> {
        Ok(self.engine()?.requested(&lock.into()))
    }

    pub fn request_timestamp(
        &self,
        lock: impl Into<LockName>,
    ) -> Result<Option<Timestamp>, CoordinatorError> {
        Ok(self.engine()?.request_timestamp(&lock.into()).cloned())
    }

    /// Leader only: decide whether `node` may hold `lock` right now
    pub fn grant(
        &mut self,
        lock: impl Into<LockName>,
        node: &NodeId,
    ) -> Result<bool, CoordinatorError> {
        let lock = lock.into();
        Ok(self.engine_mut()?.grant(&lock, node)?)
    }

    pub fn holders(&self, lock: impl Into<LockName>) -> Result<Vec<NodeId>, CoordinatorError> {
        Ok(self.engine()?.holders(&lock.into()))
    }

    pub fn queue(&self, lock: impl Into<LockName>) -> Result<Vec<NodeId>, CoordinatorError> {
        Ok(self.engine()?.queue(&lock.into()))
    }
}

impl<C: Cluster, K: Clock> LockApi for Coordinator<C, K> {
    type Error = CoordinatorError;

    fn acquire(&mut self, lock: &LockName) -> Result<bool, Self::Error> {
        Coordinator::acquire(self, lock)
    }

    fn granted(&self, lock: &LockName) -> Result<bool, Self::Error> {
        Coordinator::granted(self, lock)
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
