//! Source configuration types.
//!
//! A "source" names where observability data for one deployment is read
//! from (metric and log index aliases) and how it is displayed (field
//! mappings, default views, log column layout). Deployments store partial
//! overrides; anything not overridden comes from the default descriptor.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// A fully-resolved source configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceConfiguration {
    /// Display name.
    pub name: String,

    /// Free-form description.
    #[serde(default)]
    pub description: String,

    /// Index alias metrics are read from.
    pub metric_alias: String,

    /// Index alias logs are read from.
    pub log_alias: String,

    /// Field name mappings.
    pub fields: SourceFields,

    /// Saved inventory view id.
    pub inventory_default_view: String,

    /// Saved metrics explorer view id.
    pub metrics_explorer_default_view: String,

    /// Ordered column layout of the log stream UI.
    pub log_columns: Vec<LogColumn>,
}

impl SourceConfiguration {
    /// Check the descriptor's invariants.
    ///
    /// Column ids are used as stable keys for UI ordering and editing, so
    /// they must be unique within the sequence.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_log_columns(&self.log_columns)
    }
}

/// Field name mappings of a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFields {
    /// Field holding the container id.
    pub container: String,

    /// Field holding the host name.
    pub host: String,

    /// Candidate message fields, in preference order.
    pub message: Vec<String>,

    /// Field holding the pod id.
    pub pod: String,

    /// Field used to break timestamp ties.
    pub tiebreaker: String,

    /// Timestamp field.
    pub timestamp: String,
}

/// One column of the log stream layout.
///
/// Externally tagged on the wire, so each entry is exactly one of
/// `{"timestampColumn": {...}}`, `{"fieldColumn": {...}}` or
/// `{"messageColumn": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogColumn {
    #[serde(rename = "timestampColumn")]
    Timestamp(TimestampColumn),
    #[serde(rename = "fieldColumn")]
    Field(FieldColumn),
    #[serde(rename = "messageColumn")]
    Message(MessageColumn),
}

impl LogColumn {
    /// New timestamp column with a generated id.
    pub fn timestamp() -> Self {
        Self::Timestamp(TimestampColumn { id: generated_id() })
    }

    /// New field column with a generated id.
    pub fn field(field: impl Into<String>) -> Self {
        Self::Field(FieldColumn {
            id: generated_id(),
            field: field.into(),
        })
    }

    /// New message column with a generated id.
    pub fn message() -> Self {
        Self::Message(MessageColumn { id: generated_id() })
    }

    /// Stable key of the column within its layout.
    pub fn id(&self) -> &str {
        match self {
            Self::Timestamp(column) => &column.id,
            Self::Field(column) => &column.id,
            Self::Message(column) => &column.id,
        }
    }
}

/// Column rendering the event timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampColumn {
    pub id: String,
}

/// Column rendering an arbitrary document field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldColumn {
    pub id: String,
    pub field: String,
}

/// Column rendering the resolved log message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageColumn {
    pub id: String,
}

fn generated_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub(crate) fn validate_log_columns(columns: &[LogColumn]) -> Result<(), ConfigError> {
    let mut seen = std::collections::HashSet::new();
    for column in columns {
        if !seen.insert(column.id()) {
            return Err(ConfigError::Config(format!(
                "duplicate log column id {:?}",
                column.id()
            )));
        }
    }
    Ok(())
}

/// A stored per-deployment override of a source configuration.
///
/// Every field is optional; `apply_to` layers the override on top of a
/// base descriptor. `log_columns` replaces the whole layout, since the
/// columns are an ordered sequence edited as a unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceConfigurationPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_alias: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_alias: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<SourceFieldsPatch>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory_default_view: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics_explorer_default_view: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_columns: Option<Vec<LogColumn>>,
}

/// Field mapping overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFieldsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiebreaker: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl SourceConfigurationPatch {
    /// Layer this override over a base descriptor.
    pub fn apply_to(&self, base: &SourceConfiguration) -> SourceConfiguration {
        let mut resolved = base.clone();

        if let Some(name) = &self.name {
            resolved.name = name.clone();
        }
        if let Some(description) = &self.description {
            resolved.description = description.clone();
        }
        if let Some(metric_alias) = &self.metric_alias {
            resolved.metric_alias = metric_alias.clone();
        }
        if let Some(log_alias) = &self.log_alias {
            resolved.log_alias = log_alias.clone();
        }
        if let Some(fields) = &self.fields {
            if let Some(container) = &fields.container {
                resolved.fields.container = container.clone();
            }
            if let Some(host) = &fields.host {
                resolved.fields.host = host.clone();
            }
            if let Some(message) = &fields.message {
                resolved.fields.message = message.clone();
            }
            if let Some(pod) = &fields.pod {
                resolved.fields.pod = pod.clone();
            }
            if let Some(tiebreaker) = &fields.tiebreaker {
                resolved.fields.tiebreaker = tiebreaker.clone();
            }
            if let Some(timestamp) = &fields.timestamp {
                resolved.fields.timestamp = timestamp.clone();
            }
        }
        if let Some(log_columns) = &self.log_columns {
            resolved.log_columns = log_columns.clone();
        }

        resolved
    }

    /// Whether the override changes anything at all.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
