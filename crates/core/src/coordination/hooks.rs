// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Extension points invoked on the leader when grants change

use crate::id::{LockName, NodeId};
use crate::timestamp::Timestamp;

/// Callbacks for bookkeeping around grants (e.g. hold-duration statistics).
///
/// Both methods run on the leader only. The engine logs every change itself,
/// so the defaults do nothing.
pub trait LockHooks: Send + Sync {
    /// A grant was recorded for `node`
    fn granted(&self, _node: &NodeId, _lock: &LockName, _timestamp: &Timestamp) {}

    /// A grant was revoked; `timestamp` is the request timestamp it was issued for
    fn released(&self, _node: &NodeId, _lock: &LockName, _timestamp: &Timestamp) {}
}

/// Hooks that do nothing
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHooks;

impl LockHooks for NoopHooks {}
