//! flowcheck flow - Flow Tree Layer
//!
//! This crate defines the **accumulation** side of flowcheck:
//! - `Flow`: a named container of errors, notes and child flows
//! - `FlowOptions`: the factory that creates root flows
//! - `FlowReport`: the frozen tree returned by terminal operations
//!
//! **IMPORTANT**: This layer is synchronous - no async, and no I/O except the
//! optional stderr echo in `Flow::abort`.

pub mod entry;
pub mod error;
pub mod flow;
pub mod options;
pub mod report;

mod render;

pub use entry::Entry;
pub use error::OptionsError;
pub use flow::Flow;
pub use options::{FlowOptions, new_debug, new_default};
pub use report::FlowReport;

pub mod prelude {
    pub use crate::entry::Entry;
    pub use crate::flow::Flow;
    pub use crate::options::{FlowOptions, new_debug, new_default};
    pub use crate::report::FlowReport;
}
