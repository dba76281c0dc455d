//! flowcheck core.
//!
//! Defines the pieces every flow tree is made of, independent of the flow
//! container itself:
//! - [`Report`]: the compact / human-readable rendering contract
//! - [`LabelledError`]: an error annotated with a label, its flow and a trace
//! - [`Failure`]: a recorded error classified by what it can render
//! - [`TraceProvider`]: the injected trace-capture capability

pub mod error;
pub mod failure;
pub mod labelled;
pub mod report;
pub mod text;
pub mod trace;

pub use error::AssertionFailed;
pub use failure::{Failure, Recognizer, register_recognizer, register_report};
pub use labelled::{LabelledError, label_error};
pub use report::{BoxError, Report, SharedError, SharedReport};
pub use trace::TraceProvider;

pub mod prelude {
    pub use crate::failure::Failure;
    pub use crate::labelled::{LabelledError, label_error};
    pub use crate::report::Report;
    pub use crate::trace::TraceProvider;
}
