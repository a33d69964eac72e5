//! Source override storage and resolution.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use skald_core::{SourceConfiguration, SourceConfigurationPatch};

use crate::defaults::default_source_configuration;
use crate::error::SourceError;

/// Trait for source override storage backends.
#[async_trait]
pub trait SourceStore: Send + Sync {
    /// Fetch the stored override for a source, if any.
    async fn get(&self, id: &str) -> Result<Option<SourceConfigurationPatch>, SourceError>;

    /// Store or replace the override for a source.
    async fn upsert(&self, id: &str, patch: SourceConfigurationPatch) -> Result<(), SourceError>;

    /// Remove the override for a source. Removing an absent override is
    /// not an error.
    async fn delete(&self, id: &str) -> Result<(), SourceError>;

    /// Ids of all sources with a stored override.
    async fn list(&self) -> Result<Vec<String>, SourceError>;
}

/// In-memory override store.
pub struct MemorySourceStore {
    overrides: RwLock<HashMap<String, SourceConfigurationPatch>>,
}

impl MemorySourceStore {
    pub fn new() -> Self {
        Self {
            overrides: RwLock::new(HashMap::new()),
        }
    }

    /// Seed the store with a set of overrides, e.g. from `skald.yaml`.
    pub fn with_overrides(overrides: HashMap<String, SourceConfigurationPatch>) -> Self {
        Self {
            overrides: RwLock::new(overrides),
        }
    }

    fn read(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, SourceConfigurationPatch>>, SourceError>
    {
        self.overrides
            .read()
            .map_err(|e| SourceError::Storage(format!("failed to acquire read lock: {e}")))
    }
}

impl Default for MemorySourceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SourceStore for MemorySourceStore {
    async fn get(&self, id: &str) -> Result<Option<SourceConfigurationPatch>, SourceError> {
        Ok(self.read()?.get(id).cloned())
    }

    async fn upsert(&self, id: &str, patch: SourceConfigurationPatch) -> Result<(), SourceError> {
        let mut overrides = self
            .overrides
            .write()
            .map_err(|e| SourceError::Storage(format!("failed to acquire write lock: {e}")))?;
        overrides.insert(id.to_string(), patch);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), SourceError> {
        let mut overrides = self
            .overrides
            .write()
            .map_err(|e| SourceError::Storage(format!("failed to acquire write lock: {e}")))?;
        overrides.remove(id);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<String>, SourceError> {
        let mut ids: Vec<_> = self.read()?.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}

/// Source configuration resolver.
///
/// Layers stored overrides over the default descriptor and validates the
/// result before handing it out.
pub struct Sources {
    store: std::sync::Arc<dyn SourceStore>,
}

impl Sources {
    pub fn new(store: std::sync::Arc<dyn SourceStore>) -> Self {
        Self { store }
    }

    /// Resolve a source to its effective configuration.
    ///
    /// With no stored override this is exactly the default descriptor.
    pub async fn resolve(&self, id: &str) -> Result<SourceConfiguration, SourceError> {
        let base = default_source_configuration();
        let resolved = match self.store.get(id).await? {
            Some(patch) => patch.apply_to(&base),
            None => base,
        };

        resolved
            .validate()
            .map_err(|e| SourceError::InvalidConfiguration(e.to_string()))?;

        Ok(resolved)
    }

    /// Store an override for a source.
    ///
    /// The override is validated against the default before being stored,
    /// so a patch can never make a source unresolvable.
    pub async fn update(
        &self,
        id: &str,
        patch: SourceConfigurationPatch,
    ) -> Result<SourceConfiguration, SourceError> {
        let resolved = patch.apply_to(&default_source_configuration());
        resolved
            .validate()
            .map_err(|e| SourceError::InvalidConfiguration(e.to_string()))?;

        self.store.upsert(id, patch).await?;
        tracing::debug!(target: "sources", source = id, "stored source override");
        Ok(resolved)
    }

    /// Drop a stored override, reverting the source to the default.
    pub async fn reset(&self, id: &str) -> Result<(), SourceError> {
        self.store.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skald_core::config::source::{LogColumn, MessageColumn, TimestampColumn};
    use std::sync::Arc;

    fn sources() -> Sources {
        Sources::new(Arc::new(MemorySourceStore::new()))
    }

    #[tokio::test]
    async fn resolves_to_the_default_without_an_override() {
        let resolved = sources().resolve("default").await.unwrap();
        assert_eq!(resolved, default_source_configuration());
    }

    #[tokio::test]
    async fn stored_override_is_layered_over_the_default() {
        let sources = sources();
        sources
            .update(
                "default",
                SourceConfigurationPatch {
                    log_alias: Some("custom-logs-*".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let resolved = sources.resolve("default").await.unwrap();
        assert_eq!(resolved.log_alias, "custom-logs-*");
        assert_eq!(resolved.metric_alias, "metricbeat-*");
    }

    #[tokio::test]
    async fn reset_reverts_to_the_default() {
        let sources = sources();
        sources
            .update(
                "default",
                SourceConfigurationPatch {
                    name: Some("Renamed".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        sources.reset("default").await.unwrap();
        let resolved = sources.resolve("default").await.unwrap();
        assert_eq!(resolved.name, "Default");
    }

    #[tokio::test]
    async fn update_rejects_duplicate_column_ids() {
        let patch = SourceConfigurationPatch {
            log_columns: Some(vec![
                LogColumn::Timestamp(TimestampColumn {
                    id: "dup".to_string(),
                }),
                LogColumn::Message(MessageColumn {
                    id: "dup".to_string(),
                }),
            ]),
            ..Default::default()
        };

        let sources = sources();
        let err = sources.update("default", patch).await.unwrap_err();
        assert!(matches!(err, SourceError::InvalidConfiguration(_)));

        // Nothing was stored.
        let resolved = sources.resolve("default").await.unwrap();
        assert_eq!(resolved, default_source_configuration());
    }

    #[tokio::test]
    async fn list_names_stored_overrides() {
        let store = Arc::new(MemorySourceStore::new());
        let sources = Sources::new(Arc::clone(&store) as Arc<dyn SourceStore>);

        assert!(store.list().await.unwrap().is_empty());
        sources
            .update("staging", SourceConfigurationPatch::default())
            .await
            .unwrap();
        sources
            .update("production", SourceConfigurationPatch::default())
            .await
            .unwrap();

        assert_eq!(
            store.list().await.unwrap(),
            vec!["production".to_string(), "staging".to_string()]
        );
    }
}
