//! The default source descriptor.
//!
//! Consumers that load a named source and find no stored override
//! substitute this exact record.

use skald_core::config::source::{
    FieldColumn, LogColumn, MessageColumn, SourceConfiguration, SourceFields, TimestampColumn,
};

/// Index alias metrics are read from when nothing is configured.
pub const METRICS_INDEX_PATTERN: &str = "metricbeat-*";

/// Index alias logs are read from when nothing is configured.
pub const LOGS_INDEX_PATTERN: &str = "filebeat-*";

/// Default timestamp field.
pub const TIMESTAMP_FIELD: &str = "@timestamp";

/// The descriptor substituted for any source without a stored override.
///
/// The column ids are fixed: they are the stable keys the UI uses to
/// order and edit the layout.
pub fn default_source_configuration() -> SourceConfiguration {
    SourceConfiguration {
        name: "Default".to_string(),
        description: String::new(),
        metric_alias: METRICS_INDEX_PATTERN.to_string(),
        log_alias: LOGS_INDEX_PATTERN.to_string(),
        fields: SourceFields {
            container: "container.id".to_string(),
            host: "host.name".to_string(),
            message: vec!["message".to_string(), "@message".to_string()],
            pod: "kubernetes.pod.uid".to_string(),
            tiebreaker: "_doc".to_string(),
            timestamp: TIMESTAMP_FIELD.to_string(),
        },
        inventory_default_view: "0".to_string(),
        metrics_explorer_default_view: "0".to_string(),
        log_columns: vec![
            LogColumn::Timestamp(TimestampColumn {
                id: "5e7f964a-be8a-40d8-88d2-fbcfbdca0e2f".to_string(),
            }),
            LogColumn::Field(FieldColumn {
                id: "eb9777a8-fcd3-420e-ba7d-172fff6da7a2".to_string(),
                field: "event.dataset".to_string(),
            }),
            LogColumn::Message(MessageColumn {
                id: "b645d6da-824b-4723-9a2a-e8cece1645c0".to_string(),
            }),
        ],
    }
}
