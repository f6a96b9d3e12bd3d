// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Turn lifecycle and caller-facing API for leader-mediated locks
//!
//! A node runs its work in turns. Each turn is bracketed by
//! [`Coordinator::begin_turn`] and [`Coordinator::end_turn`]; in between,
//! caller code may `acquire` and check `granted` as often as it likes.
//! Skipping `end_turn` leaves the turn's requests and grants unpersisted
//! and its held locks unreleased.
//!
//! ```ignore
//! let mut coordinator = Coordinator::new(cluster, CoordinatorConfig::default());
//! coordinator.begin_turn().await?;
//! let mut restart = require_if("restart", || config_changed, || restart_service());
//! restart.run(&mut coordinator)?;
//! coordinator.end_turn().await?;
//! ```

mod config;
mod coordinator;
mod error;
mod registry;

pub use config::{ConfigError, CoordinatorConfig, CoordinatorKind, LockPolicyConfig};
pub use coordinator::{Coordinator, TurnReport};
pub use error::CoordinatorError;
pub use ll_storage::RequestTier;
pub use registry::{CoordinatorRegistry, SharedCoordinator};
