// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Round-robin turns over an in-memory cluster

use anyhow::{bail, Result};
use chrono::Duration;
use ll_adapters::{Cluster, MemoryFabric, MemoryNode, TracedCluster};
use ll_core::FakeClock;
use ll_engine::{Coordinator, CoordinatorConfig};
use std::io::Write;

pub struct Settings {
    pub nodes: usize,
    pub turns: usize,
    pub lock: String,
    pub leader: usize,
    pub local_only: bool,
    pub config: CoordinatorConfig,
}

type SimCoordinator = Coordinator<TracedCluster<MemoryNode>, FakeClock>;

/// Run every round, writing one line per turn in which a node holds the lock
pub async fn run(settings: &Settings, out: &mut impl Write) -> Result<()> {
    if settings.nodes == 0 {
        bail!("--nodes must be at least 1");
    }
    if settings.leader >= settings.nodes {
        bail!(
            "--leader {} is out of range for {} nodes",
            settings.leader,
            settings.nodes
        );
    }
    if settings.lock.is_empty() {
        bail!("--lock must not be empty");
    }

    let fabric = MemoryFabric::new();
    let clock = FakeClock::new();
    let mut coordinators: Vec<SimCoordinator> = (0..settings.nodes)
        .map(|i| {
            let node = fabric.node(format!("sim/{i}"));
            if !settings.local_only {
                fabric.join(&node.local_node());
            }
            Coordinator::with_clock(
                TracedCluster::new(node),
                settings.config.clone(),
                clock.clone(),
            )
        })
        .collect();
    if let Some(leader) = coordinators.get(settings.leader) {
        fabric.set_leader(&leader.local_node());
    }

    for round in 1..=settings.turns {
        for coordinator in &mut coordinators {
            clock.advance(Duration::seconds(1));
            let lock = settings.lock.as_str();
            let (held, _) = coordinator.run_turn(|c| c.acquire(lock)).await?;
            if held {
                writeln!(out, "round {round}: {} holds {lock}", coordinator.local_node())?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "sim_tests.rs"]
mod tests;
