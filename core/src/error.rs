use thiserror::Error;

/// The error synthesized when a flow assertion does not hold.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[error("assertion failed")]
pub struct AssertionFailed;
