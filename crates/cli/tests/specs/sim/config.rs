//! Config file specs

use crate::prelude::*;

#[test]
fn base_kind_grants_every_node() {
    let sandbox = Sandbox::new();
    let path = sandbox.file("ll.toml", "kind = \"Base\"\n");
    let path = path.display().to_string();
    sandbox
        .llsim()
        .args(["--turns", "2", "--config", path.as_str()])
        .passes()
        .stdout_eq(
            "round 1: sim/0 holds restart\n\
             round 2: sim/0 holds restart\n\
             round 2: sim/1 holds restart\n\
             round 2: sim/2 holds restart\n",
        );
}

#[test]
fn per_lock_concurrent_policy() {
    let sandbox = Sandbox::new();
    let path = sandbox.file(
        "ll.toml",
        "namespace = \"deploy\"\n\n[locks.restart]\npolicy = \"concurrent\"\nmax_holders = 2\n",
    );
    let path = path.display().to_string();
    sandbox
        .llsim()
        .args(["--turns", "2", "--config", path.as_str()])
        .passes()
        .stdout_eq(
            "round 1: sim/0 holds restart\n\
             round 2: sim/1 holds restart\n\
             round 2: sim/2 holds restart\n",
        );
}

#[test]
fn override_does_not_touch_other_locks() {
    let sandbox = Sandbox::new();
    let path = sandbox.file("ll.toml", "[locks.drain]\npolicy = \"permissive\"\n");
    let path = path.display().to_string();
    sandbox
        .llsim()
        .args(["--turns", "2", "--config", path.as_str()])
        .passes()
        .stdout_eq(
            "round 1: sim/0 holds restart\n\
             round 2: sim/1 holds restart\n",
        );
}
