//! Argument and config error specs

use crate::prelude::*;

#[test]
fn leader_out_of_range_fails() {
    llsim()
        .args(["--nodes", "2", "--leader", "5"])
        .fails()
        .stderr_has("out of range");
}

#[test]
fn zero_nodes_fails() {
    llsim().args(["--nodes", "0"]).fails().stderr_has("--nodes");
}

#[test]
fn unknown_flag_fails() {
    llsim().args(["--bogus"]).fails().stderr_has("--bogus");
}

#[test]
fn non_numeric_nodes_fails() {
    llsim().args(["--nodes", "many"]).fails().stderr_has("invalid value");
}

#[test]
fn missing_config_file_fails() {
    let sandbox = Sandbox::new();
    sandbox
        .llsim()
        .args(["--config", "absent.toml"])
        .fails()
        .stderr_has("io error");
}

#[test]
fn unknown_config_field_fails() {
    let sandbox = Sandbox::new();
    let path = sandbox.file("ll.toml", "namespace = \"x\"\ncolour = \"blue\"\n");
    let path = path.display().to_string();
    sandbox
        .llsim()
        .args(["--config", path.as_str()])
        .fails()
        .stderr_has("colour");
}

#[test]
fn zero_max_holders_fails() {
    let sandbox = Sandbox::new();
    let path = sandbox.file(
        "ll.toml",
        "[locks.restart]\npolicy = \"concurrent\"\nmax_holders = 0\n",
    );
    let path = path.display().to_string();
    sandbox
        .llsim()
        .args(["--config", path.as_str()])
        .fails()
        .stderr_has("max_holders");
}
