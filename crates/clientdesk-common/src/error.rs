//! Error types shared across ClientDesk crates

use thiserror::Error;

/// Result type alias for shared operations
pub type Result<T> = std::result::Result<T, CommonError>;

/// Errors that are not specific to a single crate
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CommonError {
    /// Build a configuration error from any displayable message
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
