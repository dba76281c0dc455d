use crate::entry::Entry;
use crate::render;
use flowcheck_core::{Failure, Report};
use std::error::Error;
use std::fmt;

/// An immutable snapshot of a flow tree.
///
/// Terminal operations hand this out (wrapped in a
/// [`LabelledError`](flowcheck_core::LabelledError)) instead of the live flow,
/// so the returned error is `Send + Sync` and stops changing once returned.
#[derive(Debug, Clone)]
pub struct FlowReport {
    name: String,
    entries: Vec<Entry<FlowReport>>,
    error_count: usize,
}

impl FlowReport {
    pub(crate) fn new(name: String, entries: Vec<Entry<FlowReport>>, error_count: usize) -> Self {
        Self {
            name,
            entries,
            error_count,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Children in the order they were recorded.
    pub fn entries(&self) -> &[Entry<FlowReport>] {
        &self.entries
    }

    /// Errors recorded directly in this flow. Nested flows are not counted.
    pub fn errors(&self) -> impl Iterator<Item = &Failure> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Error(failure) => Some(failure),
            _ => None,
        })
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn is_failed(&self) -> bool {
        self.error_count > 0
    }

    /// Nested flow snapshots.
    pub fn branches(&self) -> impl Iterator<Item = &FlowReport> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Flow(flow) => Some(flow),
            _ => None,
        })
    }

    pub fn notes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Note(note) => Some(note.as_str()),
            _ => None,
        })
    }
}

impl fmt::Display for FlowReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render::compact(&self.name, &self.entries))
    }
}

impl Error for FlowReport {}

impl Report for FlowReport {
    fn human_text(&self) -> String {
        render::human(&self.name, &self.entries)
    }
}
