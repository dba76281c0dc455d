use crate::labelled::LabelledError;
use crate::report::{BoxError, Report, SharedError, SharedReport};
use parking_lot::RwLock;
use std::any::TypeId;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Turns a boxed error into a report, or hands it back untouched.
pub type Recognizer = fn(BoxError) -> Result<SharedReport, BoxError>;

static RECOGNIZERS: RwLock<Vec<(TypeId, Recognizer)>> = RwLock::new(Vec::new());

/// Teach [`Failure::from_boxed`] to recognize `T` behind a box.
///
/// Registering the same `T` twice keeps the first recognizer.
pub fn register_recognizer<T: 'static>(recognize: Recognizer) {
    let id = TypeId::of::<T>();
    let mut recognizers = RECOGNIZERS.write();
    if recognizers.iter().all(|(known, _)| *known != id) {
        recognizers.push((id, recognize));
    }
}

/// Register a [`Report`] type that is recorded as is once recognized.
pub fn register_report<R: Report>() {
    register_recognizer::<R>(downcast_report::<R>);
}

fn downcast_report<R: Report>(err: BoxError) -> Result<SharedReport, BoxError> {
    let report = err.downcast::<R>()?;
    Ok(Arc::new(*report))
}

/// A recorded error, classified once by what it can render.
///
/// Classification happens when the error is recorded so that rendering is a
/// plain `match` instead of repeated downcasting.
#[derive(Debug, Clone)]
pub enum Failure {
    /// Any error without a human-readable form.
    Plain(SharedError),
    /// An error that also implements [`Report`].
    Report(SharedReport),
}

impl Failure {
    /// Wrap a report-capable error.
    pub fn report<R: Report>(report: R) -> Self {
        Failure::Report(Arc::new(report))
    }

    /// Classify a boxed error. Labelled errors and registered report types
    /// become [`Failure::Report`], everything else [`Failure::Plain`].
    pub fn from_boxed(err: BoxError) -> Self {
        let mut err = match err.downcast::<LabelledError>() {
            Ok(labelled) => return Failure::Report(Arc::new(*labelled)),
            Err(err) => err,
        };
        // Copied out so a recognizer may register further types.
        let recognizers: Vec<Recognizer> = RECOGNIZERS.read().iter().map(|(_, r)| *r).collect();
        for recognize in recognizers {
            match recognize(err) {
                Ok(report) => return Failure::Report(report),
                Err(other) => err = other,
            }
        }
        Failure::Plain(Arc::from(err))
    }

    /// Single-line text.
    pub fn compact_text(&self) -> String {
        match self {
            Failure::Plain(err) => err.to_string(),
            Failure::Report(report) => report.compact_text(),
        }
    }

    /// The human-readable text, if this failure has one.
    pub fn human_text(&self) -> Option<String> {
        match self {
            Failure::Plain(_) => None,
            Failure::Report(report) => Some(report.human_text()),
        }
    }

    /// Borrow the failure as a standard error.
    pub fn as_error(&self) -> &(dyn Error + 'static) {
        match self {
            Failure::Plain(err) => &**err,
            Failure::Report(report) => &**report,
        }
    }

    pub fn is_report(&self) -> bool {
        matches!(self, Failure::Report(_))
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.compact_text())
    }
}
