//! login-check
//!
//! Walks a fake login through the three paths a real one can take (bad input,
//! bad credentials, a database failure) and prints what each flow reports.
//!
//! Options come from `FLOWCHECK_CAPTURE_STACK` / `FLOWCHECK_REPORT_ON_ABORT`,
//! log verbosity from `RUST_LOG`.

use anyhow::Result;
use flowcheck::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Scenario {
    Normal,
    BadInput,
    BadLogin,
    SystemError,
}

const SCENARIOS: [Scenario; 4] = [
    Scenario::Normal,
    Scenario::BadInput,
    Scenario::BadLogin,
    Scenario::SystemError,
];

fn main() -> Result<()> {
    // Initialize tracing
    flowcheck::init_tracing();

    let options = FlowOptions::from_env()?;
    tracing::info!(
        capture_stack = options.capture_stack_on_check,
        report_on_abort = options.report_on_abort,
        "Running login scenarios"
    );

    for scenario in SCENARIOS {
        match login_check(&options, scenario) {
            Ok(()) => println!("{scenario:?}: ok"),
            Err(err) => {
                println!("{scenario:?}: {err}");
                println!("{}", err.human_text());
            }
        }
    }

    Ok(())
}

// ============================================================
// Scenario
// ============================================================

fn login_check(options: &FlowOptions, scenario: Scenario) -> Result<(), LabelledError> {
    let flow = options.create("login check");
    flow.log_with_time("login from 192.169.111.222");

    if matches!(scenario, Scenario::BadInput) {
        let bad_input = flow.branch("bad input");
        bad_input.must(false, "username is not empty");
        // The branch is folded back in so the parent reports it.
        flow.add(bad_input.done("bad input").err());
        return flow.done("bad input");
    }

    if matches!(scenario, Scenario::SystemError) {
        let db = flow.branch("database error");
        db.log("flow diverted from login check");
        if db.check(lookup_user().err(), "get user record") {
            db.log("critical: maybe logs can trigger certain handlers");
            return Err(db.abort("system"));
        }
    }

    if matches!(scenario, Scenario::BadLogin) {
        flow.check(Some("password does not match"), "verify credentials");
        return flow.done("bad login");
    }

    flow.done("login okay")
}

fn lookup_user() -> Result<(), std::io::Error> {
    Err(std::io::Error::other("database: generic database error"))
}
