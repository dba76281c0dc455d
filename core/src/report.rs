//! # Report: the two-view rendering contract
//!
//! Everything that can end up inside a flow tree renders two ways:
//!
//! * **compact**: a single-line form, the same text `Display` produces, so a
//!   report composes with any consumer of `std::error::Error`.
//! * **human**: a multi-line, indented form meant for people reading logs.

use std::error::Error;
use std::sync::Arc;

/// Shared, thread-safe handle on an arbitrary error.
pub type SharedError = Arc<dyn Error + Send + Sync + 'static>;

/// Owned boxed error, the usual entry point for caller-provided errors.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Shared handle on a report-capable value.
pub type SharedReport = Arc<dyn Report>;

/// An error that can also describe itself in human-readable form.
///
/// Implemented by labelled errors and by flows (both live and snapshotted).
pub trait Report: Error + Send + Sync + 'static {
    /// Multi-line rendering. Always ends with a newline.
    fn human_text(&self) -> String;

    /// Single-line rendering.
    fn compact_text(&self) -> String {
        self.to_string()
    }
}
