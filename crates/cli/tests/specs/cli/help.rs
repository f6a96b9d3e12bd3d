//! Help output specs

use crate::prelude::*;

#[test]
fn help_lists_every_flag() {
    let out = llsim().args(["--help"]).passes();
    for flag in [
        "--nodes",
        "--turns",
        "--lock",
        "--leader",
        "--local-only",
        "--config",
        "--log-file",
    ] {
        assert!(out.stdout.contains(flag), "missing {flag}:\n{}", out.stdout);
    }
}

#[test]
fn version_prints_binary_name() {
    llsim().args(["--version"]).passes().stdout_has("llsim");
}
