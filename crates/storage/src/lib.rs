// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Persistence of lock requests and grants across the three store tiers

mod codec;
mod error;
mod persistence;

pub use codec::{decode_row, decode_table, encode_row, encode_table};
pub use error::StorageError;
pub use persistence::{RequestTier, TurnStorage};
