//! # Flow: a named accumulator of errors, branches and notes
//!
//! A flow records what happened during one logical operation. Callers
//! `check` fallible steps, `log` notes, `branch` into child flows for
//! alternative paths, and finally collapse everything with `done` or `abort`.
//!
//! ## Failure status
//!
//! A flow has failed if and only if at least one error was recorded directly
//! into it with [`Flow::add`], [`Flow::check`] or [`Flow::must`]. Notes never
//! count, and neither do errors recorded in child flows: a child's outcome
//! reaches its parent only when the caller folds it back in, typically with
//! `parent.add(child.done("label").err())`.
//!
//! ## Example
//!
//! ```rust
//! use flowcheck_flow::FlowOptions;
//!
//! let flow = FlowOptions::standard().with_capture_stack(false).create("login check");
//! flow.log("login from 192.169.111.222");
//!
//! let db = flow.branch("database error");
//! let lookup: Result<(), &str> = Err("database: generic database error");
//! if db.check(lookup.err(), "get user record") {
//!     let err = db.abort("system");
//!     assert_eq!(
//!         err.to_string(),
//!         "system: flow(database error): {get user record: database: generic database error}"
//!     );
//! }
//!
//! // The parent never checked anything itself.
//! assert!(flow.done("login okay").is_ok());
//! ```

use crate::entry::Entry;
use crate::options::FlowOptions;
use crate::report::FlowReport;
use chrono::{DateTime, SecondsFormat, Utc};
use flowcheck_core::{
    AssertionFailed, BoxError, Failure, LabelledError, Report, SharedReport, register_recognizer,
    register_report,
};
use parking_lot::Mutex;
use std::error::Error;
use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Once, Weak};

struct Node {
    name: String,
    options: FlowOptions,
    parent: Weak<Node>,
    body: Mutex<Body>,
}

#[derive(Default)]
struct Body {
    children: Vec<Entry>,
    errors: Vec<Failure>,
    branches: Vec<Flow>,
    notes: Vec<String>,
}

/// A handle on a flow. Clones share the same flow.
#[derive(Clone)]
pub struct Flow {
    node: Arc<Node>,
}

impl Flow {
    pub(crate) fn root(name: String, options: FlowOptions) -> Self {
        register_flow_reports();
        Self::with_parent(name, options, Weak::new())
    }

    fn with_parent(name: String, options: FlowOptions, parent: Weak<Node>) -> Self {
        Self {
            node: Arc::new(Node {
                name,
                options,
                parent,
                body: Mutex::new(Body::default()),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.node.name
    }

    pub fn options(&self) -> &FlowOptions {
        &self.node.options
    }

    /// The flow this one was branched from, if it is still alive.
    pub fn parent(&self) -> Option<Flow> {
        self.node.parent.upgrade().map(|node| Flow { node })
    }

    /// Whether both handles refer to the same flow.
    pub fn ptr_eq(&self, other: &Flow) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }

    // ------------------------------------------------------------------
    // Recording
    // ------------------------------------------------------------------

    /// Record `err` as is, without a label. Returns whether anything was recorded.
    pub fn add<E>(&self, err: Option<E>) -> bool
    where
        E: Into<BoxError>,
    {
        let Some(err) = err else {
            return false;
        };
        let failure = Failure::from_boxed(err.into());
        tracing::debug!(flow = %self.name(), error = %failure, "Recorded unlabelled error");
        self.push_failure(failure);
        true
    }

    /// Record `err` under `label`, capturing a trace if the options ask for
    /// one. Returns whether anything was recorded, so it reads as
    /// "did this step fail":
    ///
    /// ```rust
    /// # let flow = flowcheck_flow::new_default("sync");
    /// # let fetch = || -> Result<(), std::io::Error> { Ok(()) };
    /// if flow.check(fetch().err(), "fetch manifest") {
    ///     return;
    /// }
    /// ```
    ///
    /// The trace describes where the error was *checked*, not where it was
    /// raised.
    pub fn check<E>(&self, err: Option<E>, label: &str) -> bool
    where
        E: Into<BoxError>,
    {
        let Some(err) = err else {
            return false;
        };
        let cause = Failure::from_boxed(err.into());
        let mut labelled = LabelledError::with_cause(cause, label, self.name());
        if self.node.options.capture_stack_on_check {
            labelled = labelled.with_trace(self.node.options.trace_provider.capture());
        }
        tracing::debug!(flow = %self.name(), label, error = %labelled, "Check failed");
        self.push_failure(Failure::report(labelled));
        true
    }

    /// [`Flow::check`] the error side of `result` and hand back the success side.
    pub fn check_result<T, E>(&self, result: Result<T, E>, label: &str) -> Option<T>
    where
        E: Into<BoxError>,
    {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.check(Some(err), label);
                None
            }
        }
    }

    /// Assert `condition`.
    ///
    /// Note the polarity: returns `true` when the assertion **failed** (and an
    /// error labelled `message` was recorded), `false` when it held.
    pub fn must(&self, condition: bool, message: &str) -> bool {
        if condition {
            return false;
        }
        self.check(Some(AssertionFailed), message)
    }

    /// Attach a note. Notes never make a flow fail.
    pub fn log(&self, note: impl Into<String>) {
        let note = note.into();
        tracing::trace!(flow = %self.name(), note = %note, "Logged note");
        let mut body = self.node.body.lock();
        body.notes.push(note.clone());
        body.children.push(Entry::Note(note));
    }

    /// Attach a note stamped with the current UTC time.
    pub fn log_with_time(&self, note: &str) {
        self.log_at(note, Utc::now());
    }

    /// Attach a note stamped with `at`, as `<note> @<RFC3339>`.
    pub fn log_at(&self, note: &str, at: DateTime<Utc>) {
        self.log(format!(
            "{} @{}",
            note,
            at.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
    }

    /// Start a child flow for an alternative path.
    ///
    /// The child inherits this flow's options and shows up in its reports, but
    /// its errors do not make this flow fail.
    pub fn branch(&self, name: impl Into<String>) -> Flow {
        let child = Flow::with_parent(
            name.into(),
            self.node.options.clone(),
            Arc::downgrade(&self.node),
        );
        tracing::trace!(flow = %self.name(), branch = %child.name(), "Branched");
        let mut body = self.node.body.lock();
        body.branches.push(child.clone());
        body.children.push(Entry::Flow(child.clone()));
        child
    }

    fn push_failure(&self, failure: Failure) {
        let mut body = self.node.body.lock();
        body.errors.push(failure.clone());
        body.children.push(Entry::Error(failure));
    }

    // ------------------------------------------------------------------
    // Terminal operations
    // ------------------------------------------------------------------

    /// Finish the flow. `Ok` if nothing was recorded directly into it,
    /// otherwise the flow wrapped in an error labelled `label`.
    pub fn done(&self, label: &str) -> Result<(), LabelledError> {
        if !self.is_failed() {
            return Ok(());
        }
        Err(self.wrap(label))
    }

    /// End the flow abnormally. Always returns an error, even for a clean flow.
    ///
    /// With `report_on_abort` set, the human-readable report is written to
    /// stderr first.
    pub fn abort(&self, label: &str) -> LabelledError {
        self.abort_with(label, || io::stderr().lock())
    }

    /// [`Flow::abort`], writing the report to `out` instead of stderr.
    pub fn abort_into<W: Write>(&self, label: &str, out: &mut W) -> LabelledError {
        self.abort_with(label, || out)
    }

    /// The writer is only opened when the report is actually echoed.
    fn abort_with<W, O>(&self, label: &str, open: O) -> LabelledError
    where
        W: Write,
        O: FnOnce() -> W,
    {
        let err = self.wrap(label);
        tracing::warn!(flow = %self.name(), label, errors = self.error_count(), "Flow aborted");
        if self.node.options.report_on_abort {
            if let Err(io_err) = open().write_all(err.human_text().as_bytes()) {
                tracing::error!(
                    flow = %self.name(),
                    error = %io_err,
                    "Failed to write abort report"
                );
            }
        }
        err
    }

    fn wrap(&self, label: &str) -> LabelledError {
        LabelledError::with_cause(Failure::report(self.snapshot()), label, self.name())
    }

    // ------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------

    /// Freeze the current state of this flow and all its branches.
    pub fn snapshot(&self) -> FlowReport {
        let (children, error_count) = {
            let body = self.node.body.lock();
            (body.children.clone(), body.errors.len())
        };
        let entries = children
            .into_iter()
            .map(|entry| entry.map_flow(|flow| flow.snapshot()))
            .collect();
        FlowReport::new(self.node.name.clone(), entries, error_count)
    }

    /// Children in the order they were recorded.
    pub fn children(&self) -> Vec<Entry> {
        self.node.body.lock().children.clone()
    }

    /// Errors recorded directly into this flow.
    pub fn errors(&self) -> Vec<Failure> {
        self.node.body.lock().errors.clone()
    }

    pub fn error_count(&self) -> usize {
        self.node.body.lock().errors.len()
    }

    pub fn is_failed(&self) -> bool {
        self.error_count() > 0
    }

    /// Flows branched from this one.
    pub fn branches(&self) -> Vec<Flow> {
        self.node.body.lock().branches.clone()
    }

    pub fn notes(&self) -> Vec<String> {
        self.node.body.lock().notes.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.node.body.lock().children.is_empty()
    }
}

/// Live flows and flow snapshots keep their human-readable form wherever they
/// are recorded or labelled. Every flow starts from a root, so registering
/// there covers them all.
fn register_flow_reports() {
    static REGISTER: Once = Once::new();
    REGISTER.call_once(|| {
        register_recognizer::<Flow>(snapshot_flow);
        register_report::<FlowReport>();
    });
}

fn snapshot_flow(err: BoxError) -> Result<SharedReport, BoxError> {
    let flow = err.downcast::<Flow>()?;
    Ok(Arc::new(flow.snapshot()))
}

impl fmt::Debug for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = self.node.body.lock();
        f.debug_struct("Flow")
            .field("name", &self.node.name)
            .field("children", &body.children.len())
            .field("errors", &body.errors.len())
            .finish()
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.snapshot(), f)
    }
}

impl Error for Flow {}

impl Report for Flow {
    fn human_text(&self) -> String {
        self.snapshot().human_text()
    }
}
