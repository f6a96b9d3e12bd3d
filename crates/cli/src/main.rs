// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! llsim - run leader-mediated locks over a simulated cluster

mod logging;
mod sim;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "llsim",
    version,
    about = "Simulate leader-mediated locks across a cluster of nodes"
)]
struct Cli {
    /// Number of nodes in the cluster
    #[arg(long, default_value_t = 3)]
    nodes: usize,

    /// Number of rounds; every node runs one turn per round
    #[arg(long, default_value_t = 3)]
    turns: usize,

    /// Lock every node competes for
    #[arg(long, default_value = "restart")]
    lock: String,

    /// Index of the leader node
    #[arg(long, default_value_t = 0)]
    leader: usize,

    /// Keep nodes out of the peer group so requests stay local
    #[arg(long)]
    local_only: bool,

    /// Coordinator config (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init(cli.log_file.as_deref())?;

    let config = match &cli.config {
        Some(path) => ll_engine::CoordinatorConfig::load(path)?,
        None => ll_engine::CoordinatorConfig::default(),
    };
    let settings = sim::Settings {
        nodes: cli.nodes,
        turns: cli.turns,
        lock: cli.lock,
        leader: cli.leader,
        local_only: cli.local_only,
        config,
    };

    let mut stdout = std::io::stdout().lock();
    sim::run(&settings, &mut stdout).await
}
