// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Leader-mediated lock coordination
//!
//! This module provides:
//! - **LockLedger** - Turn-scoped cache of every node's requests and the leader's grants
//! - **LockEngine** - Acquire, grant decisions, stale-grant revocation and implicit release
//! - **GrantPolicy** - Pluggable per-lock decision of who may join the holder set
//! - **require_if** - Run caller code only while holding a lock

pub mod event;
pub mod hooks;
pub mod ledger;
pub mod policy;
pub mod protocol;
pub mod require;

pub use event::LockEvent;
pub use hooks::{LockHooks, NoopHooks};
pub use ledger::{LockLedger, LockRow, LockTable};
pub use policy::{Concurrent, GrantPolicies, GrantPolicy, GrantRequest, Permissive, Serial};
pub use protocol::LockEngine;
pub use require::{require, require_if, LockApi, Required};

use crate::id::NodeId;
use thiserror::Error;

/// Errors raised by the lock protocol
///
/// These are caller-logic bugs, never transient conditions.
#[derive(Debug, Error)]
pub enum CoordinationError {
    #[error("{operation} requires leadership, but {node} is not the leader")]
    NotLeader {
        operation: &'static str,
        node: NodeId,
    },
}
