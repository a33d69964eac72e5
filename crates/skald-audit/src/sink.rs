//! Sink seam between the gate and the logging subsystem.

use serde_json::{Map, Value};

/// Destination for gated audit events.
///
/// The production implementation forwards to `tracing`; tests substitute a
/// recording double.
pub trait AuditSink: Send + Sync {
    /// Record an event at debug severity.
    fn debug(&self, message: &str, fields: &Map<String, Value>);
}

/// Forwards events to the `tracing` subsystem under the audit trail target.
pub struct TracingSink;

impl AuditSink for TracingSink {
    fn debug(&self, message: &str, fields: &Map<String, Value>) {
        let fields = Value::Object(fields.clone());
        tracing::debug!(
            target: "audit_trail",
            fields = %fields,
            "{message}"
        );
    }
}
