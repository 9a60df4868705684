//! Crate error type.
//!
//! The reveal/counter engine itself never fails; these errors come from the
//! edges: configuration, the terminal host and form delivery.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid root margin `{input}`: {reason}")]
    RootMargin { input: String, reason: &'static str },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("layout failed: {0}")]
    Layout(String),

    #[error("delivery failed: {0}")]
    Delivery(String),
}

impl From<taffy::TaffyError> for Error {
    fn from(err: taffy::TaffyError) -> Self {
        Self::Layout(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
