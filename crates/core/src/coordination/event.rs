// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events recorded by the lock engine during a turn

use crate::id::{LockName, NodeId};
use crate::timestamp::Timestamp;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LockEvent {
    /// This node created a new request
    Requested { lock: LockName, timestamp: Timestamp },
    /// The leader recorded a grant
    Granted {
        node: NodeId,
        lock: LockName,
        timestamp: Timestamp,
    },
    /// The leader dropped a grant that no longer matches its request
    Revoked {
        node: NodeId,
        lock: LockName,
        timestamp: Timestamp,
    },
    /// This node gave up a lock it held at the end of the turn
    Released { lock: LockName, timestamp: Timestamp },
}

impl LockEvent {
    /// Event name in `lock:<action>` form
    pub fn name(&self) -> &'static str {
        match self {
            LockEvent::Requested { .. } => "lock:requested",
            LockEvent::Granted { .. } => "lock:granted",
            LockEvent::Revoked { .. } => "lock:revoked",
            LockEvent::Released { .. } => "lock:released",
        }
    }
}
