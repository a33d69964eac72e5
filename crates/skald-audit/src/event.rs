//! Audit event type.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A structured record describing a security-relevant action in the host.
///
/// Events are produced externally and immutable once emitted. The message
/// is the primary text; every other field rides along as structured
/// metadata, flattened on the wire so an event serializes as
/// `{"message": ..., "<field>": ..., ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Primary event text.
    pub message: String,

    /// Remaining structured fields.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl AuditEvent {
    /// Create an event with the given message and no extra fields.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            fields: Map::new(),
        }
    }

    /// Attach a structured field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

impl std::fmt::Display for AuditEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        for (key, value) in &self.fields {
            write!(f, " {key}={value}")?;
        }
        Ok(())
    }
}
