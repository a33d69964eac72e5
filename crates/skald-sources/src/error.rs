//! Error types for the sources crate.

use thiserror::Error;

/// Errors that can occur while managing source configurations.
#[derive(Debug, Error)]
pub enum SourceError {
    /// A resolved or stored configuration violated an invariant.
    #[error("invalid source configuration: {0}")]
    InvalidConfiguration(String),

    /// Storage error.
    #[error("storage error: {0}")]
    Storage(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
