//! Round output specs
//!
//! Every node runs one turn per round; a line is printed whenever a node
//! sees its grant.

use crate::prelude::*;

#[test]
fn defaults_rotate_restart_through_three_nodes() {
    llsim().passes().stdout_eq(
        "round 1: sim/0 holds restart\n\
         round 2: sim/1 holds restart\n\
         round 3: sim/2 holds restart\n",
    );
}

#[test]
fn rotation_wraps_back_to_the_leader() {
    llsim()
        .args(["--nodes", "2", "--turns", "4"])
        .passes()
        .stdout_eq(
            "round 1: sim/0 holds restart\n\
             round 2: sim/1 holds restart\n\
             round 3: sim/0 holds restart\n\
             round 4: sim/1 holds restart\n",
        );
}

#[test]
fn lock_name_is_printed() {
    llsim()
        .args(["--nodes", "1", "--turns", "1", "--lock", "reboot"])
        .passes()
        .stdout_eq("round 1: sim/0 holds reboot\n");
}

#[test]
fn local_only_nodes_are_invisible_to_the_leader() {
    llsim()
        .args(["--turns", "2", "--leader", "1", "--local-only"])
        .passes()
        .stdout_eq(
            "round 1: sim/1 holds restart\n\
             round 2: sim/1 holds restart\n",
        );
}

#[test]
fn zero_turns_prints_nothing() {
    llsim().args(["--turns", "0"]).passes().stdout_eq("");
}
