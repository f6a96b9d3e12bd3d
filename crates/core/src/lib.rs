// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ll-core: Core library for leader-mediated lock coordination
//!
//! This crate provides:
//! - Sortable UTC timestamps and a clock abstraction for testable time handling
//! - The turn-scoped request/grant ledger
//! - The lock protocol engine with pluggable grant policies
//! - The conditional-run wrapper used by caller code

pub mod clock;
pub mod coordination;
pub mod id;
pub mod timestamp;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock};
pub use coordination::{
    require, require_if, Concurrent, CoordinationError, GrantPolicies, GrantPolicy,
    GrantRequest, LockApi, LockEngine, LockEvent, LockHooks, LockLedger, LockRow, LockTable,
    NoopHooks, Permissive, Required, Serial,
};
pub use id::{LockName, NodeId};
pub use timestamp::{Timestamp, TimestampError};
