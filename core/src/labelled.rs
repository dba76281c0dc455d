//! # LabelledError
//!
//! The leaf of a flow tree: an error annotated with "what was being done"
//! (the label), "where" (the originating flow) and optionally a captured trace.

use crate::failure::Failure;
use crate::report::{BoxError, Report};
use crate::text::indent_block;
use std::error::Error;
use std::fmt;

/// An error with a label prepended, plus the name of the flow it was
/// recorded in and an optional opaque trace.
#[derive(Debug, Clone)]
pub struct LabelledError {
    cause: Failure,
    label: String,
    flow: String,
    trace: Option<Vec<u8>>,
}

impl LabelledError {
    /// Label an error outside of any flow.
    pub fn new<E>(err: E, label: impl Into<String>) -> Self
    where
        E: Into<BoxError>,
    {
        Self::with_cause(Failure::from_boxed(err.into()), label, "")
    }

    /// Label an already classified failure on behalf of `flow`.
    pub fn with_cause(cause: Failure, label: impl Into<String>, flow: impl Into<String>) -> Self {
        Self {
            cause,
            label: label.into(),
            flow: flow.into(),
            trace: None,
        }
    }

    /// Attach a captured trace.
    pub fn with_trace(mut self, trace: Vec<u8>) -> Self {
        self.trace = Some(trace);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Name of the flow the error was checked in. Empty when the error was
    /// labelled outside a flow.
    pub fn flow(&self) -> &str {
        &self.flow
    }

    pub fn trace(&self) -> Option<&[u8]> {
        self.trace.as_deref()
    }

    pub fn cause(&self) -> &Failure {
        &self.cause
    }
}

/// Label `err` if there is one.
///
/// ```
/// use flowcheck_core::label_error;
///
/// let err = label_error(Some("connection refused"), "dial upstream").unwrap();
/// assert_eq!(err.to_string(), "dial upstream: connection refused");
/// assert!(label_error(None::<&str>, "dial upstream").is_none());
/// ```
pub fn label_error<E>(err: Option<E>, label: impl Into<String>) -> Option<LabelledError>
where
    E: Into<BoxError>,
{
    err.map(|err| LabelledError::new(err, label))
}

impl fmt::Display for LabelledError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.cause)
    }
}

impl Error for LabelledError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.cause.as_error())
    }
}

impl Report for LabelledError {
    fn human_text(&self) -> String {
        if let Some(inner) = self.cause.human_text() {
            return format!("{}: {}", self.label, inner);
        }
        let mut text = format!("{}: {}\n", self.label, self.cause);
        if let Some(trace) = &self.trace {
            let trace = String::from_utf8_lossy(trace);
            text.push_str(&indent_block(trace.trim_end_matches('\n')));
            text.push('\n');
        }
        text
    }
}
