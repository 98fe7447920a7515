use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::{FilterSinkError, PricingError, PricingSource, QuoteGateway, UserFilterSink};
use crate::db::EstimatorRepository;
use crate::models::{CompanyPricing, QuoteRequest, QuoteResponse, RequestOrigin, UserFilter};
use crate::submission::SubmissionError;

/// Runs the estimator against a local repository instead of the remote API.
///
/// Company pricing is read from the stored companies, quotes are recorded
/// in the repository, and filter reports are stored with the configured
/// origin.
pub struct LocalQuoteDesk {
    repo: Arc<dyn EstimatorRepository>,
    origin: RequestOrigin,
}

impl LocalQuoteDesk {
    pub fn new(repo: Arc<dyn EstimatorRepository>) -> Self {
        Self {
            repo,
            origin: RequestOrigin::default(),
        }
    }

    pub fn with_origin(
        mut self,
        origin: RequestOrigin,
    ) -> Self {
        self.origin = origin;
        self
    }

    pub fn repository(&self) -> &Arc<dyn EstimatorRepository> {
        &self.repo
    }
}

#[async_trait]
impl PricingSource for LocalQuoteDesk {
    async fn fetch_companies(&self) -> Result<Vec<CompanyPricing>, PricingError> {
        let companies = self.repo.list_companies().await?;
        Ok(companies
            .into_iter()
            .map(|company| CompanyPricing {
                name: Some(company.name),
                ..company.pricing
            })
            .collect())
    }
}

#[async_trait]
impl QuoteGateway for LocalQuoteDesk {
    async fn submit_quote(
        &self,
        request: &QuoteRequest,
    ) -> Result<QuoteResponse, SubmissionError> {
        let stored = self
            .repo
            .create_quote(request)
            .await
            .map_err(|e| SubmissionError::Transport(e.to_string()))?;

        info!(quote_id = stored.id, "quote recorded locally");
        Ok(QuoteResponse {
            success: true,
            message: Some("Quote submitted successfully".to_string()),
        })
    }
}

#[async_trait]
impl UserFilterSink for LocalQuoteDesk {
    async fn store_filter(
        &self,
        filter: &UserFilter,
    ) -> Result<(), FilterSinkError> {
        self.repo.store_user_filter(filter, &self.origin).await?;
        Ok(())
    }
}
