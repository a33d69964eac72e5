//! Shared types for the Skald observability platform.
//!
//! This crate holds the configuration types used across all Skald crates
//! (loaded from `skald.yaml`) and the license feature record pushed by the
//! licensing collaborator.

pub mod config;
pub mod license;

pub use config::{
    AppenderConfig, AuditTrailConfig, ConfigError, LayoutConfig, LogColumn, LoggerToggle,
    SkaldConfig, SourceConfiguration, SourceConfigurationPatch, SourceFields,
};
pub use license::LicenseFeatures;
