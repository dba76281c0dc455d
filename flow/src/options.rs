//! # FlowOptions: the flow factory
//!
//! Options are captured when a root flow is created and inherited unchanged by
//! every flow branched from it.
//!
//! They can be built in code, parsed from TOML, or read from the environment:
//!
//! ```toml
//! capture_stack_on_check = true
//! report_on_abort = false
//! ```
//!
//! | variable | field |
//! |---|---|
//! | `FLOWCHECK_CAPTURE_STACK` | `capture_stack_on_check` |
//! | `FLOWCHECK_REPORT_ON_ABORT` | `report_on_abort` |

use crate::error::OptionsError;
use crate::flow::Flow;
use flowcheck_core::TraceProvider;
use serde::Deserialize;

pub const CAPTURE_STACK_VAR: &str = "FLOWCHECK_CAPTURE_STACK";
pub const REPORT_ON_ABORT_VAR: &str = "FLOWCHECK_REPORT_ON_ABORT";

/// Configuration for new flows.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlowOptions {
    /// Capture a trace every time [`Flow::check`] records an error.
    pub capture_stack_on_check: bool,
    /// Write the human-readable report to stderr inside [`Flow::abort`].
    pub report_on_abort: bool,
    /// Where traces come from when `capture_stack_on_check` is set.
    #[serde(skip)]
    pub trace_provider: TraceProvider,
}

impl Default for FlowOptions {
    fn default() -> Self {
        Self::standard()
    }
}

impl FlowOptions {
    /// Capture traces, stay quiet on abort.
    pub fn standard() -> Self {
        Self {
            capture_stack_on_check: true,
            report_on_abort: false,
            trace_provider: TraceProvider::default(),
        }
    }

    /// Intended to echo aborted flows to stderr.
    ///
    /// Currently identical to [`FlowOptions::standard`]: it does not set
    /// `report_on_abort`. Use [`FlowOptions::with_report_on_abort`] to get the
    /// echo.
    pub fn debug() -> Self {
        Self {
            capture_stack_on_check: true,
            report_on_abort: false,
            trace_provider: TraceProvider::default(),
        }
    }

    pub fn with_capture_stack(mut self, enabled: bool) -> Self {
        self.capture_stack_on_check = enabled;
        self
    }

    pub fn with_report_on_abort(mut self, enabled: bool) -> Self {
        self.report_on_abort = enabled;
        self
    }

    /// Replace the trace capability, e.g. with [`TraceProvider::fixed`] in tests.
    pub fn with_trace_provider(mut self, provider: TraceProvider) -> Self {
        self.trace_provider = provider;
        self
    }

    /// Create a root flow identified by `name`.
    ///
    /// Names do not need to be unique, although a naming convention per
    /// package keeps reports readable.
    pub fn create(&self, name: impl Into<String>) -> Flow {
        Flow::root(name.into(), self.clone())
    }

    /// Parse options from TOML. Missing keys keep their [`FlowOptions::standard`] value.
    pub fn from_toml_str(source: &str) -> Result<Self, OptionsError> {
        Ok(toml::from_str(source)?)
    }

    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self, OptionsError> {
        Self::from_env_with(|var| std::env::var(var).ok())
    }

    /// Read overrides through `lookup`. Unset variables keep their
    /// [`FlowOptions::standard`] value.
    pub fn from_env_with<L>(lookup: L) -> Result<Self, OptionsError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let mut options = Self::standard();
        if let Some(value) = lookup(CAPTURE_STACK_VAR) {
            options.capture_stack_on_check = parse_flag(CAPTURE_STACK_VAR, &value)?;
        }
        if let Some(value) = lookup(REPORT_ON_ABORT_VAR) {
            options.report_on_abort = parse_flag(REPORT_ON_ABORT_VAR, &value)?;
        }
        Ok(options)
    }
}

/// A root flow with the standard options.
pub fn new_default(name: impl Into<String>) -> Flow {
    FlowOptions::standard().create(name)
}

/// A root flow with the debug options. See [`FlowOptions::debug`].
pub fn new_debug(name: impl Into<String>) -> Flow {
    FlowOptions::debug().create(name)
}

fn parse_flag(var: &'static str, value: &str) -> Result<bool, OptionsError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(OptionsError::InvalidFlag {
            var,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| vars.get(var).cloned()
    }

    #[test]
    fn presets_match() {
        let standard = FlowOptions::standard();
        let debug = FlowOptions::debug();
        assert!(standard.capture_stack_on_check);
        assert!(!standard.report_on_abort);
        assert_eq!(debug.capture_stack_on_check, standard.capture_stack_on_check);
        assert_eq!(debug.report_on_abort, standard.report_on_abort);
    }

    #[test]
    fn default_is_standard() {
        let options = FlowOptions::default();
        assert!(options.capture_stack_on_check);
        assert!(!options.report_on_abort);
    }

    #[test]
    fn toml_overrides_only_given_keys() {
        let options = FlowOptions::from_toml_str("report_on_abort = true").unwrap();
        assert!(options.capture_stack_on_check);
        assert!(options.report_on_abort);

        let options = FlowOptions::from_toml_str("").unwrap();
        assert!(options.capture_stack_on_check);
        assert!(!options.report_on_abort);
    }

    #[test]
    fn toml_rejects_unknown_keys_and_bad_types() {
        assert!(matches!(
            FlowOptions::from_toml_str("print_stderr = true"),
            Err(OptionsError::Parse(_))
        ));
        assert!(matches!(
            FlowOptions::from_toml_str("report_on_abort = \"sometimes\""),
            Err(OptionsError::Parse(_))
        ));
    }

    #[test]
    fn env_flags_accept_common_spellings() {
        let options = FlowOptions::from_env_with(env(&[
            ("FLOWCHECK_CAPTURE_STACK", "off"),
            ("FLOWCHECK_REPORT_ON_ABORT", " YES "),
        ]))
        .unwrap();
        assert!(!options.capture_stack_on_check);
        assert!(options.report_on_abort);
    }

    #[test]
    fn env_unset_keeps_standard() {
        let options = FlowOptions::from_env_with(env(&[])).unwrap();
        assert!(options.capture_stack_on_check);
        assert!(!options.report_on_abort);
    }

    #[test]
    fn env_rejects_garbage() {
        let err = FlowOptions::from_env_with(env(&[("FLOWCHECK_REPORT_ON_ABORT", "maybe")]))
            .unwrap_err();
        match err {
            OptionsError::InvalidFlag { var, value } => {
                assert_eq!(var, REPORT_ON_ABORT_VAR);
                assert_eq!(value, "maybe");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn created_flows_carry_the_options() {
        let options = FlowOptions::standard().with_capture_stack(false).with_report_on_abort(true);
        let flow = options.create("sync");
        assert_eq!(flow.name(), "sync");
        assert!(!flow.options().capture_stack_on_check);
        assert!(flow.options().report_on_abort);
        assert_eq!(new_default("a").name(), "a");
        assert_eq!(new_debug("b").name(), "b");
    }
}
