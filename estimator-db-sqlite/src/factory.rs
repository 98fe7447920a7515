use std::sync::Arc;

use async_trait::async_trait;
use estimator_core::db::{DbConfig, RepositoryFactory};
use estimator_core::{EstimatorRepository, RepositoryError};
use tracing::debug;

use crate::repository::SqliteRepository;

/// [`RepositoryFactory`] for SQLite.
///
/// Register this with a [`estimator_core::db::RepositoryRegistry`] to make
/// the `"sqlite"` backend available:
///
/// ```rust,no_run
/// use estimator_core::db::RepositoryRegistry;
/// use estimator_db_sqlite::SqliteRepositoryFactory;
///
/// let mut registry = RepositoryRegistry::new();
/// registry.register(Box::new(SqliteRepositoryFactory));
/// ```
pub struct SqliteRepositoryFactory;

#[async_trait]
impl RepositoryFactory for SqliteRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Open the database described by `config.connection_string`.
    ///
    /// Accepted connection-string values:
    /// * A bare file path, e.g. `"estimator.db"`. The file is created if it
    ///   does not exist.
    /// * A `sqlite:` URL.
    /// * `":memory:"`, an ephemeral in-memory database.
    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Arc<dyn EstimatorRepository>, RepositoryError> {
        let repo = SqliteRepository::new(&config.connection_string)
            .await
            .map_err(|e| RepositoryError::Connection(format!("{e:#}")))?;
        repo.run_migrations()
            .await
            .map_err(|e| RepositoryError::Database(format!("{e:#}")))?;

        debug!(database = %config.connection_string, "sqlite repository ready");
        Ok(Arc::new(repo))
    }
}
