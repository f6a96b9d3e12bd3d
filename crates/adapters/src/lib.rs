// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for the shared stores a node coordinates through

pub mod file;
pub mod memory;
pub mod store;
pub mod traced;

pub use file::FileLocalStore;
pub use memory::{MemoryFabric, MemoryNode, StoreCall, StoreOp};
pub use store::{Cluster, LeaderStore, LocalStore, PeerStore, StoreError};
pub use traced::{Traced, TracedCluster};
