//! # Trace capture
//!
//! A trace is an opaque byte blob attached to a labelled error. Where it comes
//! from is decided by whoever builds the flow: the default provider captures
//! the current call stack, tests usually inject a fixed blob.

use std::backtrace::Backtrace;
use std::fmt;
use std::sync::Arc;

type CaptureFn = dyn Fn() -> Vec<u8> + Send + Sync;

/// A cloneable capability that produces a trace on demand.
#[derive(Clone)]
pub struct TraceProvider {
    capture: Arc<CaptureFn>,
    kind: &'static str,
}

impl TraceProvider {
    /// Wrap an arbitrary capture function.
    pub fn new<F>(capture: F) -> Self
    where
        F: Fn() -> Vec<u8> + Send + Sync + 'static,
    {
        Self {
            capture: Arc::new(capture),
            kind: "custom",
        }
    }

    /// Capture the call stack of whoever calls [`TraceProvider::capture`],
    /// regardless of `RUST_BACKTRACE`.
    pub fn backtrace() -> Self {
        Self {
            capture: Arc::new(|| Backtrace::force_capture().to_string().into_bytes()),
            kind: "backtrace",
        }
    }

    /// Always produce the same bytes.
    pub fn fixed(trace: impl Into<Vec<u8>>) -> Self {
        let trace: Vec<u8> = trace.into();
        Self {
            capture: Arc::new(move || trace.clone()),
            kind: "fixed",
        }
    }

    pub fn capture(&self) -> Vec<u8> {
        (self.capture)()
    }
}

impl Default for TraceProvider {
    fn default() -> Self {
        Self::backtrace()
    }
}

impl fmt::Debug for TraceProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraceProvider")
            .field("kind", &self.kind)
            .finish()
    }
}
