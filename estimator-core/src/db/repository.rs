use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    Company, FilterSnapshot, FilterStatistics, NewCompany, QuoteRequest, RequestOrigin,
    StoredQuote, UserFilter, UserFilterPage, UserFilterQuery, UserFilterRecord,
};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

#[async_trait]
pub trait EstimatorRepository: Send + Sync {
    // Company pricing
    async fn upsert_company(&self, company: &NewCompany) -> Result<Company, RepositoryError>;
    async fn get_company_by_name(&self, name: &str) -> Result<Company, RepositoryError>;
    async fn list_companies(&self) -> Result<Vec<Company>, RepositoryError>;

    // Quotes
    async fn create_quote(&self, quote: &QuoteRequest) -> Result<StoredQuote, RepositoryError>;
    async fn get_quote(&self, id: i64) -> Result<StoredQuote, RepositoryError>;
    async fn list_quotes(&self) -> Result<Vec<StoredQuote>, RepositoryError>;

    // User-filter telemetry
    async fn store_user_filter(
        &self,
        filter: &UserFilter,
        origin: &RequestOrigin,
    ) -> Result<UserFilterRecord, RepositoryError>;

    async fn list_user_filters(
        &self,
        query: &UserFilterQuery,
    ) -> Result<UserFilterPage, RepositoryError>;

    async fn filter_statistics(&self) -> Result<FilterStatistics, RepositoryError>;

    /// Every stored report, newest first, with the highest id seen.
    async fn snapshot_user_filters(&self) -> Result<FilterSnapshot, RepositoryError>;

    /// Deletes reports with `id <= watermark`; returns how many were removed.
    async fn purge_user_filters_through(&self, watermark: i64) -> Result<u64, RepositoryError>;
}
