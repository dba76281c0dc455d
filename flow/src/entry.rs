//! Entry - One Child of a Flow
//!
//! A flow's children are a single ordered list mixing three kinds of item.
//! The order is the order things happened in, so it is kept exactly as
//! recorded and every rendering walks it front to back.
//!
//! # Example
//! ```rust
//! use flowcheck_flow::{Entry, FlowOptions};
//!
//! let flow = FlowOptions::standard().create("login check");
//! flow.log("login from 192.169.111.222");
//! let _child = flow.branch("bad input");
//!
//! let kinds: Vec<_> = flow.children().iter().map(Entry::kind).collect();
//! assert_eq!(kinds, ["note", "flow"]);
//! ```

use crate::flow::Flow;
use flowcheck_core::Failure;

/// A child of a flow.
///
/// `F` is the nested-flow representation: a live [`Flow`] handle while the
/// flow is being built, a [`FlowReport`](crate::FlowReport) once snapshotted.
#[derive(Debug, Clone)]
pub enum Entry<F = Flow> {
    /// A recorded error (labelled or not). Counts towards failure.
    Error(Failure),
    /// A nested flow spawned with [`Flow::branch`]. Never counts towards failure.
    Flow(F),
    /// A free-text note. Never counts towards failure.
    Note(String),
}

impl<F> Entry<F> {
    /// Check if this entry is a recorded error
    pub fn is_error(&self) -> bool {
        matches!(self, Entry::Error(_))
    }

    /// Check if this entry is a nested flow
    pub fn is_flow(&self) -> bool {
        matches!(self, Entry::Flow(_))
    }

    /// Check if this entry is a note
    pub fn is_note(&self) -> bool {
        matches!(self, Entry::Note(_))
    }

    /// Short name of the entry kind, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Entry::Error(_) => "error",
            Entry::Flow(_) => "flow",
            Entry::Note(_) => "note",
        }
    }

    /// Map the nested-flow representation
    pub fn map_flow<G, M>(self, op: M) -> Entry<G>
    where
        M: FnOnce(F) -> G,
    {
        match self {
            Entry::Error(failure) => Entry::Error(failure),
            Entry::Flow(flow) => Entry::Flow(op(flow)),
            Entry::Note(note) => Entry::Note(note),
        }
    }
}
