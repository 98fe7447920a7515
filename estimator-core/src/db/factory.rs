use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use super::repository::{EstimatorRepository, RepositoryError};

/// Where estimator data is stored.
///
/// `backend` selects a registered [`RepositoryFactory`] by name; the
/// `connection_string` is handed to that factory untouched.
///
/// | backend    | connection_string examples             |
/// |------------|----------------------------------------|
/// | `sqlite`   | `estimator.db`, `:memory:`             |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub backend: String,
    pub connection_string: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            backend: "sqlite".to_string(),
            connection_string: ":memory:".to_string(),
        }
    }
}

impl DbConfig {
    pub fn sqlite(connection_string: impl Into<String>) -> Self {
        Self {
            backend: "sqlite".to_string(),
            connection_string: connection_string.into(),
        }
    }
}

/// Opens repositories for one storage backend.
#[async_trait]
pub trait RepositoryFactory: Send + Sync {
    /// Lowercase name the backend is selected by.
    fn backend_name(&self) -> &'static str;

    /// Connect, prepare the schema if needed, and hand back a repository.
    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Arc<dyn EstimatorRepository>, RepositoryError>;
}

/// Backend factories keyed by name. Binaries register every backend they
/// link at startup and pick one from the `--backend` flag.
pub struct RepositoryRegistry {
    factories: HashMap<&'static str, Box<dyn RepositoryFactory>>,
}

impl RepositoryRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Adds a factory, replacing any earlier one with the same name.
    pub fn register(
        &mut self,
        factory: Box<dyn RepositoryFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Registered backend names in alphabetical order.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Opens a repository with the factory named by `config.backend`.
    ///
    /// # Errors
    /// * [`RepositoryError::Configuration`] when no such backend is
    ///   registered.
    /// * Whatever the factory itself fails with.
    pub async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Arc<dyn EstimatorRepository>, RepositoryError> {
        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| {
                RepositoryError::Configuration(format!(
                    "unknown backend '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        factory.create(config).await
    }
}

impl Default for RepositoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}
