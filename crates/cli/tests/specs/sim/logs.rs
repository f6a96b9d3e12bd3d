//! Logging specs

use crate::prelude::*;

#[test]
fn log_file_receives_lock_events() {
    let sandbox = Sandbox::new();
    sandbox
        .llsim()
        .args(["--turns", "2", "--log-file", "logs/llsim.log"])
        .env("RUST_LOG", "info")
        .passes()
        .stdout_has("round 1: sim/0 holds restart");

    let logs = std::fs::read_to_string(sandbox.path().join("logs/llsim.log")).unwrap();
    assert!(logs.contains("leader grants lock"), "{logs}");
    assert!(logs.contains("released local lock"), "{logs}");
}

#[test]
fn stderr_is_quiet_by_default() {
    let out = llsim().passes();
    assert!(out.stderr.is_empty(), "{}", out.stderr);
}

#[test]
fn rust_log_enables_store_tracing() {
    llsim()
        .args(["--nodes", "1", "--turns", "1"])
        .env("RUST_LOG", "debug")
        .passes()
        .stderr_has("written");
}
