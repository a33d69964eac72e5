//! Error types for the audit trail crate.

use thiserror::Error;

/// Errors that can occur in the audit trail plugin.
#[derive(Debug, Error)]
pub enum AuditError {
    /// `setup` was called on a plugin that is already running.
    #[error("audit trail plugin is already set up")]
    AlreadySetUp,

    /// An event was emitted after the trail stopped accepting events.
    #[error("audit trail is closed")]
    TrailClosed,

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
