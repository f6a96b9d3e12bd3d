// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::clock::FakeClock;
use crate::coordination::hooks::NoopHooks;
use crate::coordination::ledger::{LockLedger, LockTable};
use crate::coordination::policy::GrantPolicies;
use crate::id::NodeId;
use crate::timestamp::Timestamp;
use std::cell::Cell;
use std::sync::Arc;

fn engine(leader: bool, grants: LockTable, requests: LockTable) -> LockEngine<FakeClock> {
    let ledger = LockLedger::new(NodeId::new("u/1"), requests, grants);
    LockEngine::new(
        ledger,
        leader,
        Arc::new(GrantPolicies::serial()),
        Arc::new(NoopHooks),
        FakeClock::new(),
    )
}

fn held() -> LockTable {
    let mut table = LockTable::new();
    table
        .entry(NodeId::new("u/1"))
        .or_default()
        .insert(LockName::new("restart"), Timestamp::from_raw("t1"));
    table
}

#[test]
fn runs_when_already_granted_without_consulting_guard() {
    let mut engine = engine(false, held(), held());
    let guard_calls = Cell::new(0);
    let mut wrapped = require_if(
        "restart",
        || {
            guard_calls.set(guard_calls.get() + 1);
            false
        },
        || 7,
    );

    assert_eq!(wrapped.run(&mut engine).unwrap(), Some(7));
    assert_eq!(guard_calls.get(), 0);
}

#[test]
fn failing_guard_does_not_request() {
    let mut engine = engine(true, LockTable::new(), LockTable::new());
    let mut wrapped = require_if("restart", || false, || ());

    assert_eq!(wrapped.run(&mut engine).unwrap(), None);
    assert!(!engine.requested(&LockName::new("restart")));
}

#[test]
fn passing_guard_acquires_on_leader() {
    let mut engine = engine(true, LockTable::new(), LockTable::new());
    let ran = Cell::new(false);
    let mut wrapped = require_if("restart", || true, || ran.set(true));

    assert_eq!(wrapped.run(&mut engine).unwrap(), Some(()));
    assert!(ran.get());
    assert!(engine.granted(&LockName::new("restart")));
}

#[test]
fn passing_guard_on_follower_only_requests() {
    let mut engine = engine(false, LockTable::new(), LockTable::new());
    let mut wrapped = require("restart", || unreachable!());

    assert_eq!(wrapped.lock().as_str(), "restart");
    assert_eq!(wrapped.run(&mut engine).unwrap(), None);
    assert!(engine.requested(&LockName::new("restart")));
}
