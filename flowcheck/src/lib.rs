//! flowcheck facade crate.
//!
//! Re-exports the core and flow crates with a single entry point, plus a
//! helper for binaries that want flowcheck's `tracing` events on stdout.
//! The library crates never install a subscriber themselves.

pub use flowcheck_core as core;
pub use flowcheck_flow as flow;

pub use flowcheck_core::{Failure, LabelledError, Report, TraceProvider, label_error};
pub use flowcheck_flow::{
    Entry, Flow, FlowOptions, FlowReport, OptionsError, new_debug, new_default,
};

pub mod prelude {
    pub use flowcheck_core::prelude::*;
    pub use flowcheck_flow::prelude::*;
}

/// Default filter when `RUST_LOG` is not set.
#[cfg(feature = "subscriber")]
pub const DEFAULT_FILTER: &str = "info,flowcheck_flow=debug";

/// Initialize a simple stdout tracing subscriber for development.
///
/// Honors `RUST_LOG`, falling back to [`DEFAULT_FILTER`]. Does nothing if a
/// global subscriber is already installed.
#[cfg(feature = "subscriber")]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
