//! Audit trail plugin configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the audit trail plugin.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditTrailConfig {
    /// Managed logger settings.
    #[serde(default)]
    pub logger: LoggerToggle,

    /// Appender the derived logging configuration registers. When absent,
    /// a console appender with a highlighted pattern layout is used.
    #[serde(default)]
    pub appender: Option<AppenderConfig>,
}

/// Whether the audit trail loggers are active.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LoggerToggle {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Default for LoggerToggle {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

/// A logging destination specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AppenderConfig {
    /// Write to stdout.
    Console {
        #[serde(default)]
        layout: LayoutConfig,
    },
    /// Append to a file.
    File { path: PathBuf },
}

impl AppenderConfig {
    /// The appender registered when no override is configured.
    pub fn default_console() -> Self {
        Self::Console {
            layout: LayoutConfig::Pattern { highlight: true },
        }
    }
}

/// Log line formatting specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LayoutConfig {
    /// Human-readable pattern layout.
    Pattern {
        #[serde(default)]
        highlight: bool,
    },
    /// One JSON object per line.
    Json,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::Pattern { highlight: false }
    }
}
