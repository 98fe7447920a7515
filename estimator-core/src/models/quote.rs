use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{HomeType, Package, Scope, UserDetails};

/// Payload posted to the quote intake endpoint.
///
/// Built only from a fully validated [`super::WizardState`], so every field
/// the intake requires is present and `estimated_cost` is a plain integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub scope: Scope,
    pub home_type: HomeType,
    pub carpet_area: String,
    pub rooms: Vec<String>,
    pub package: Package,
    pub user_details: UserDetails,
    pub estimated_cost: i64,
    pub company_id: Option<String>,
    pub company_name: Option<String>,
}

/// Body returned by the quote intake endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Acknowledgement shown to the user after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub message: String,
}

impl Confirmation {
    pub const DEFAULT_MESSAGE: &'static str =
        "Quote submitted successfully! Check your email for details.";
}

/// A quote as recorded by a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredQuote {
    pub id: i64,
    pub request: QuoteRequest,
    pub created_at: DateTime<Utc>,
}
