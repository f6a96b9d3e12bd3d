//! Behavioral specifications for llsim.
//!
//! These tests are black-box: they invoke the binary and verify stdout,
//! stderr, and exit codes.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

// cli/
#[path = "specs/cli/errors.rs"]
mod cli_errors;
#[path = "specs/cli/help.rs"]
mod cli_help;

// sim/
#[path = "specs/sim/config.rs"]
mod sim_config;
#[path = "specs/sim/logs.rs"]
mod sim_logs;
#[path = "specs/sim/rounds.rs"]
mod sim_rounds;
