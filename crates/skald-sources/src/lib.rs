//! # skald-sources
//!
//! Source configuration management for Skald.
//!
//! A source describes where observability data for one deployment is read
//! from and how it is displayed. Deployments store partial overrides; the
//! resolver layers a stored override on top of the default descriptor, and
//! substitutes the default verbatim when nothing is stored.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use skald_sources::{MemorySourceStore, Sources};
//! use skald_core::SourceConfigurationPatch;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let sources = Sources::new(Arc::new(MemorySourceStore::new()));
//!
//! // Nothing stored yet: the default descriptor comes back.
//! let default = sources.resolve("default").await?;
//! assert_eq!(default.name, "Default");
//!
//! // Store an override; later resolutions see it layered on the default.
//! sources
//!     .update(
//!         "default",
//!         SourceConfigurationPatch {
//!             metric_alias: Some("custom-metrics-*".to_string()),
//!             ..Default::default()
//!         },
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod defaults;
pub mod error;
pub mod store;

pub use defaults::default_source_configuration;
pub use error::SourceError;
pub use store::{MemorySourceStore, SourceStore, Sources};
