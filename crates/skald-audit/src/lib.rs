//! # skald-audit
//!
//! Audit trail plugin for Skald.
//!
//! This crate provides functionality for:
//! - Forwarding audit events to the logging subsystem, gated by the
//!   `allowAuditLogging` license feature
//! - Deriving the logging configuration (appender + managed logger levels)
//!   from the static plugin configuration
//! - A pluggable sink seam so hosts and tests can observe forwarded events
//!
//! ## Gating
//!
//! The license check is re-evaluated for every delivered event against the
//! latest value of the license watch cell, so a mid-stream license change
//! takes effect on the next event. Until the licensing collaborator pushes
//! a first value, nothing is logged.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use skald_audit::{license_channel, AuditEvent, AuditTrailPlugin};
//! use skald_core::{AuditTrailConfig, LicenseFeatures};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let (feed, watch) = license_channel();
//! feed.push(LicenseFeatures::all_allowed());
//!
//! let mut plugin = AuditTrailPlugin::new(AuditTrailConfig::default());
//! let handle = plugin.setup(watch)?;
//!
//! handle.emit(AuditEvent::new("user logged in").with_field("user", "admin"))?;
//!
//! plugin.stop().await;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod event;
pub mod license;
pub mod logging;
pub mod plugin;
pub mod sink;

pub use error::AuditError;
pub use event::AuditEvent;
pub use license::{license_channel, LicenseFeed, LicenseWatch};
pub use logging::{logging_config, LogLevel, LoggerEntry, LoggingConfig, APPENDER_NAME};
pub use plugin::{AuditTrailHandle, AuditTrailPlugin};
pub use sink::{AuditSink, TracingSink};
