//! Derived logging configuration.
//!
//! The plugin hands the host's logging subsystem a configuration derived
//! from its static settings: one registered appender and the managed
//! audit trail logger, running at debug level when enabled and off
//! otherwise.

use serde::{Deserialize, Serialize};
use skald_core::{AppenderConfig, AuditTrailConfig};
use std::collections::BTreeMap;

/// Name the audit trail appender is registered under.
pub const APPENDER_NAME: &str = "auditTrailAppender";

/// Name of the managed audit trail logger.
pub const LOGGER_NAME: &str = "audit_trail";

/// Configuration handed to the logging subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Registered appenders by name.
    pub appenders: BTreeMap<String, AppenderConfig>,

    /// Managed logger entries.
    pub loggers: Vec<LoggerEntry>,
}

/// One managed logger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerEntry {
    pub name: String,
    pub level: LogLevel,
    pub appenders: Vec<String>,
}

/// Severity of a managed logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Off,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Debug => write!(f, "debug"),
            Self::Off => write!(f, "off"),
        }
    }
}

/// Derive the logging configuration from the plugin's static settings.
///
/// A configured appender is registered verbatim under `APPENDER_NAME`;
/// without one, a console appender with a highlighted pattern layout is
/// registered instead.
pub fn logging_config(config: &AuditTrailConfig) -> LoggingConfig {
    let appender = config
        .appender
        .clone()
        .unwrap_or_else(AppenderConfig::default_console);

    let level = if config.logger.enabled {
        LogLevel::Debug
    } else {
        LogLevel::Off
    };

    LoggingConfig {
        appenders: BTreeMap::from([(APPENDER_NAME.to_string(), appender)]),
        loggers: vec![LoggerEntry {
            name: LOGGER_NAME.to_string(),
            level,
            appenders: vec![APPENDER_NAME.to_string()],
        }],
    }
}
