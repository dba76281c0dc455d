//! Compact and human-readable rendering of a flow's children.

use crate::entry::Entry;
use crate::report::FlowReport;
use flowcheck_core::text::{INDENT, indent};
use flowcheck_core::{Failure, Report};

/// `flow(<name>): {<child>;<child>;...}`
pub(crate) fn compact(name: &str, entries: &[Entry<FlowReport>]) -> String {
    let children: Vec<String> = entries
        .iter()
        .map(|entry| match entry {
            Entry::Error(failure) => failure.compact_text(),
            Entry::Flow(flow) => flow.compact_text(),
            Entry::Note(note) => format!("note({note})"),
        })
        .collect();
    format!("flow({name}): {{{}}}", children.join(";"))
}

/// Header line plus one bullet per child, nested text pushed one level in.
pub(crate) fn human(name: &str, entries: &[Entry<FlowReport>]) -> String {
    if entries.is_empty() {
        return format!("Flow {name}: (nothing to report)\n");
    }

    let mut out = format!("Flow {name}:\n");
    for entry in entries {
        out.push_str(INDENT);
        out.push_str("- ");
        match entry {
            Entry::Error(Failure::Report(report)) => {
                out.push_str(&indent(&report.human_text()));
            }
            Entry::Error(Failure::Plain(err)) => {
                out.push_str("error: ");
                out.push_str(&indent(&err.to_string()));
                out.push('\n');
            }
            Entry::Flow(flow) => {
                out.push_str(&indent(&flow.human_text()));
            }
            Entry::Note(note) => {
                out.push_str("log: ");
                out.push_str(&indent(note));
                out.push('\n');
            }
        }
    }
    out
}
