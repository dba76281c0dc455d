use flowcheck_core::{LabelledError, Report, TraceProvider, label_error};
use flowcheck_flow::{Flow, FlowOptions};

const TRACE: &str = "at login.rs:21";

fn options() -> FlowOptions {
    FlowOptions::standard().with_trace_provider(TraceProvider::fixed(TRACE))
}

fn fake_login_check(
    input_err: bool,
    login_err: bool,
    system_err: bool,
) -> Result<(), LabelledError> {
    let flow = options().create("login check");
    flow.log_with_time("login from 192.169.111.222");
    if input_err {
        let bad_input = flow.branch("bad input");
        return bad_input.done("bad input");
    }
    if system_err {
        let db = flow.branch("database error");
        db.log("flow diverted from login check");
        let lookup: Result<(), &str> = Err("database: generic database error");
        if db.check(lookup.err(), "get user record") {
            db.log("critical: maybe logs can trigger certain handlers");
            return Err(db.abort("system"));
        }
    }
    if login_err {
        return flow.done("bad login");
    }
    flow.done("login okay")
}

#[test]
fn alternate_flows_without_errors_succeed() {
    assert!(fake_login_check(true, false, false).is_ok());
    assert!(fake_login_check(false, true, false).is_ok());
}

#[test]
fn normal_flow_succeeds() {
    assert!(fake_login_check(false, false, false).is_ok());
}

#[test]
fn system_error_aborts_with_a_readable_report() {
    let err = fake_login_check(false, false, true).unwrap_err();
    assert_eq!(err.label(), "system");
    assert_eq!(err.flow(), "database error");

    let text = label_error(Some(err), "test").unwrap().human_text();
    assert_eq!(
        text,
        "test: system: Flow database error:\n\
         \t- log: flow diverted from login check\n\
         \t- get user record: database: generic database error\n\
         \t\tat login.rs:21\n\
         \t- log: critical: maybe logs can trigger certain handlers\n"
    );
}

#[test]
fn system_error_compact_form() {
    let err = fake_login_check(false, false, true).unwrap_err();
    assert_eq!(
        err.to_string(),
        "system: flow(database error): {\
         note(flow diverted from login check);\
         get user record: database: generic database error;\
         note(critical: maybe logs can trigger certain handlers)}"
    );
}

#[test]
fn done_names_the_flow_and_the_label() {
    let flow = options().create("login check");
    flow.add(Some("password mismatch"));
    let err = flow.done("bad login").unwrap_err();
    let compact = err.to_string();
    assert!(compact.contains("login check"));
    assert!(compact.contains("bad login"));
}

#[test]
fn empty_flow_has_nothing_to_report() {
    let flow = options().create("idle");
    assert_eq!(flow.human_text(), "Flow idle: (nothing to report)\n");
    assert_eq!(flow.to_string(), "flow(idle): {}");
}

#[test]
fn nesting_adds_one_indent_per_level() {
    let root = options().create("root");
    let child = root.branch("child");
    child.log("deep note");

    assert_eq!(
        root.human_text(),
        "Flow root:\n\t- Flow child:\n\t\t- log: deep note\n"
    );

    let grandchild = child.branch("grandchild");
    grandchild.add(Some("leaf failure"));
    assert_eq!(
        root.human_text(),
        "Flow root:\n\
         \t- Flow child:\n\
         \t\t- log: deep note\n\
         \t\t- Flow grandchild:\n\
         \t\t\t- error: leaf failure\n"
    );
    assert!(root.done("root").is_ok());
    assert!(child.done("child").is_ok());
    assert!(grandchild.done("grandchild").is_err());
}

#[test]
fn snapshot_freezes_the_tree() {
    let flow = options().create("sync");
    flow.check(Some("disk full"), "write cache");
    let err = flow.done("sync").unwrap_err();
    flow.log("after the fact");
    assert!(!err.to_string().contains("after the fact"));

    let report = flow.snapshot();
    assert_eq!(report.name(), "sync");
    assert_eq!(report.error_count(), 1);
    assert_eq!(report.notes().collect::<Vec<_>>(), ["after the fact"]);
    assert_eq!(report.entries().len(), 2);
}

#[test]
fn branches_report_through_the_parent_snapshot() {
    let flow: Flow = options().create("checkout");
    let retry = flow.branch("retry");
    retry.must(false, "second attempt succeeds");

    let report = flow.snapshot();
    assert!(!report.is_failed());
    let branches: Vec<_> = report.branches().collect();
    assert_eq!(branches.len(), 1);
    assert!(branches[0].is_failed());
    assert_eq!(
        branches[0].to_string(),
        "flow(retry): {second attempt succeeds: assertion failed}"
    );
}

#[test]
fn labelling_a_flow_keeps_its_human_report() {
    let flow = options().create("db");
    flow.log("note");
    let expected = "L: Flow db:\n\t- log: note\n";

    let from_snapshot = label_error(Some(flow.snapshot()), "L").unwrap();
    assert!(from_snapshot.cause().is_report());
    assert_eq!(from_snapshot.human_text(), expected);
    assert_eq!(from_snapshot.to_string(), "L: flow(db): {note(note)}");

    let from_live = label_error(Some(flow.clone()), "L").unwrap();
    assert_eq!(from_live.human_text(), expected);

    let direct = LabelledError::new(flow.clone(), "L");
    assert_eq!(direct.human_text(), expected);

    flow.log("later");
    assert_eq!(direct.human_text(), expected);
}
