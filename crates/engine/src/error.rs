// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the coordinator

use crate::config::ConfigError;
use ll_core::CoordinationError;
use ll_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoordinatorError {
    #[error("no turn in progress")]
    NoActiveTurn,
    #[error("a turn is already in progress")]
    TurnInProgress,
    #[error("coordination error: {0}")]
    Coordination(#[from] CoordinationError),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}
