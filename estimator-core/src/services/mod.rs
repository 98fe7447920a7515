//! Seams to the outside world: where company pricing comes from, where
//! quotes go, and where filter telemetry is reported.
//!
//! The HTTP client crate implements these against the marketplace API;
//! [`LocalQuoteDesk`] implements them over a repository.

pub mod local;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::calculations::{RateTable, compute_average_rates};
use crate::db::RepositoryError;
use crate::models::{CompanyPricing, QuoteRequest, QuoteResponse, UserFilter};
use crate::submission::SubmissionError;

pub use local::LocalQuoteDesk;

#[derive(Debug, Error)]
pub enum PricingError {
    #[error("company listing request failed: {0}")]
    Transport(String),

    #[error("company listing returned status {0}")]
    Status(u16),

    #[error("company listing could not be decoded: {0}")]
    Decode(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[derive(Debug, Error)]
pub enum FilterSinkError {
    #[error("filter report request failed: {0}")]
    Transport(String),

    #[error("filter report rejected with status {0}")]
    Status(u16),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[async_trait]
pub trait PricingSource: Send + Sync {
    /// Pricing declared by every listed company.
    async fn fetch_companies(&self) -> Result<Vec<CompanyPricing>, PricingError>;
}

#[async_trait]
pub trait QuoteGateway: Send + Sync {
    /// Delivers one quote. Transport-level failures are reported as the
    /// matching [`SubmissionError`]; a delivered request yields the
    /// server's response body whether or not it accepted the quote.
    async fn submit_quote(
        &self,
        request: &QuoteRequest,
    ) -> Result<QuoteResponse, SubmissionError>;
}

#[async_trait]
pub trait UserFilterSink: Send + Sync {
    async fn store_filter(
        &self,
        filter: &UserFilter,
    ) -> Result<(), FilterSinkError>;
}

/// Fetches company pricing once and averages it.
///
/// Never fails: any error is logged and the default table is used, so the
/// wizard stays usable when the listing is unavailable.
pub async fn load_rate_table(source: &dyn PricingSource) -> RateTable {
    match source.fetch_companies().await {
        Ok(companies) => {
            let table = compute_average_rates(&companies);
            info!(
                companies = companies.len(),
                basic = %table.basic,
                premium = %table.premium,
                luxury = %table.luxury,
                "average pricing calculated"
            );
            table
        }
        Err(e) => {
            warn!(error = %e, "could not load company pricing; using default rates");
            RateTable::defaults()
        }
    }
}

/// Reports filter usage. Failures are logged and swallowed.
pub async fn log_filter(
    sink: &dyn UserFilterSink,
    filter: &UserFilter,
) {
    if let Err(e) = sink.store_filter(filter).await {
        warn!(error = %e, page_type = filter.page_type.as_str(), "failed to log user filter");
    }
}
