// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for lock persistence

use ll_adapters::StoreError;
use ll_core::NodeId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("corrupt lock state under {key}: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("only the leader may publish grants, {node} is not the leader")]
    NotLeader { node: NodeId },
}
