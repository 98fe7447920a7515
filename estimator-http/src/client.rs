use async_trait::async_trait;
use estimator_core::services::{
    FilterSinkError, PricingError, PricingSource, QuoteGateway, UserFilterSink,
};
use estimator_core::{CompanyPricing, QuoteRequest, QuoteResponse, SubmissionError, UserFilter};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::ApiConfig;
use crate::response::interpret_quote_response;

const COMPANIES_PATH: &str = "/api/companies";
const QUOTE_PATH: &str = "/api/users/quote";
const USER_FILTER_PATH: &str = "/api/user-filters/store";

#[derive(Debug, Error)]
#[error("could not build HTTP client: {0}")]
pub struct ClientBuildError(#[from] reqwest::Error);

/// The company listing is a bare array; some deployments wrap it.
#[derive(Deserialize)]
#[serde(untagged)]
enum CompanyListing {
    Bare(Vec<CompanyPricing>),
    Wrapped { companies: Vec<CompanyPricing> },
}

impl From<CompanyListing> for Vec<CompanyPricing> {
    fn from(listing: CompanyListing) -> Self {
        match listing {
            CompanyListing::Bare(companies) | CompanyListing::Wrapped { companies } => companies,
        }
    }
}

pub struct HttpClient {
    client: Client,
    config: ApiConfig,
}

impl HttpClient {
    pub fn new(config: ApiConfig) -> Result<Self, ClientBuildError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}

fn submission_error(e: reqwest::Error) -> SubmissionError {
    if e.is_timeout() {
        SubmissionError::Timeout
    } else {
        SubmissionError::Transport(e.to_string())
    }
}

#[async_trait]
impl PricingSource for HttpClient {
    async fn fetch_companies(&self) -> Result<Vec<CompanyPricing>, PricingError> {
        let url = self.config.endpoint(COMPANIES_PATH);
        debug!(%url, "fetching company pricing");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PricingError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PricingError::Status(status.as_u16()));
        }

        let listing: CompanyListing = response
            .json()
            .await
            .map_err(|e| PricingError::Decode(e.to_string()))?;
        Ok(listing.into())
    }
}

#[async_trait]
impl QuoteGateway for HttpClient {
    async fn submit_quote(
        &self,
        request: &QuoteRequest,
    ) -> Result<QuoteResponse, SubmissionError> {
        let url = self.config.endpoint(QUOTE_PATH);
        debug!(%url, package = request.package.as_str(), "posting quote");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(submission_error)?;

        let status = response.status();
        let body = response.text().await.map_err(submission_error)?;
        interpret_quote_response(status, &body)
    }
}

#[async_trait]
impl UserFilterSink for HttpClient {
    async fn store_filter(
        &self,
        filter: &UserFilter,
    ) -> Result<(), FilterSinkError> {
        let response = self
            .client
            .post(self.config.endpoint(USER_FILTER_PATH))
            .json(filter)
            .send()
            .await
            .map_err(|e| FilterSinkError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FilterSinkError::Status(status.as_u16()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn bare_and_wrapped_listings_decode_alike() {
        let bare = r#"[{"name":"Acme","basicPriceRange":"1200"}]"#;
        let wrapped = r#"{"companies":[{"name":"Acme","basicPriceRange":"1200"}],"total":1}"#;

        let bare: Vec<CompanyPricing> = serde_json::from_str::<CompanyListing>(bare)
            .unwrap()
            .into();
        let wrapped: Vec<CompanyPricing> = serde_json::from_str::<CompanyListing>(wrapped)
            .unwrap()
            .into();

        assert_eq!(bare, wrapped);
        assert_eq!(bare[0].basic_price_range.as_deref(), Some("1200"));
    }

    #[test]
    fn client_keeps_its_config() {
        let client = HttpClient::new(ApiConfig::new("http://127.0.0.1:9")).unwrap();

        assert_eq!(client.config().base_url, "http://127.0.0.1:9");
    }
}
