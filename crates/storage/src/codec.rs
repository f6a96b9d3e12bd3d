// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON encoding of persisted lock state
//!
//! Rows and tables are ordered maps, so unchanged state always serializes
//! to the same bytes.

use crate::error::StorageError;
use ll_core::{LockRow, LockTable};

pub fn encode_row(row: &LockRow) -> Result<String, StorageError> {
    Ok(serde_json::to_string(row)?)
}

pub fn encode_table(table: &LockTable) -> Result<String, StorageError> {
    Ok(serde_json::to_string(table)?)
}

/// Decode one node's row; `key` names the value in errors
pub fn decode_row(key: &str, raw: &str) -> Result<LockRow, StorageError> {
    serde_json::from_str(raw).map_err(|source| StorageError::Corrupt {
        key: key.to_string(),
        source,
    })
}

pub fn decode_table(key: &str, raw: &str) -> Result<LockTable, StorageError> {
    serde_json::from_str(raw).map_err(|source| StorageError::Corrupt {
        key: key.to_string(),
        source,
    })
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
