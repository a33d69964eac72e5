//! Configuration types for Skald.
//!
//! This module provides the unified configuration types used across all
//! Skald crates. Configuration is loaded from a YAML file (`skald.yaml`)
//! into a single `SkaldConfig` structure.
//!
//! # Configuration File
//!
//! - **skald.yaml**: audit trail settings, an optional static license
//!   feature set, and per-deployment source configuration overrides.

pub mod audit_trail;
pub mod source;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::license::LicenseFeatures;

pub use audit_trail::{AppenderConfig, AuditTrailConfig, LayoutConfig, LoggerToggle};
pub use source::{LogColumn, SourceConfiguration, SourceConfigurationPatch, SourceFields};

/// Complete Skald configuration loaded from a file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkaldConfig {
    /// Project name.
    #[serde(default)]
    pub project: Option<String>,

    /// Audit trail plugin settings.
    #[serde(default)]
    pub audit_trail: AuditTrailConfig,

    /// Static license feature set, for deployments where the licensing
    /// collaborator is not wired up (e.g. the CLI). Absent means no
    /// license data, which fails closed.
    #[serde(default)]
    pub license: Option<LicenseFeatures>,

    /// Per-deployment source configuration overrides, keyed by source id.
    #[serde(default)]
    pub sources: HashMap<String, SourceConfigurationPatch>,
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SkaldConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML content.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        for (id, patch) in &config.sources {
            if let Some(columns) = &patch.log_columns {
                source::validate_log_columns(columns)
                    .map_err(|e| ConfigError::Config(format!("source {id:?}: {e}")))?;
            }
        }
        Ok(config)
    }

    /// Get a source override by id.
    pub fn get_source(&self, id: &str) -> Option<&SourceConfigurationPatch> {
        self.sources.get(id)
    }
}
