use thiserror::Error;

#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("invalid flow options: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{var} must be a boolean flag, got {value:?}")]
    InvalidFlag { var: &'static str, value: String },
}
