//! Turning a completed wizard into a delivered quote.

use thiserror::Error;
use tracing::{info, warn};

use crate::models::{Confirmation, QuoteRequest, WizardState};
use crate::services::QuoteGateway;
use crate::wizard::{ValidationError, validate_all};

/// Shown when the server gives no reason of its own.
pub const GENERIC_FAILURE: &str = "Failed to submit quote. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The server answered but did not accept the quote.
    #[error("{}", rejection_message(.message))]
    Rejected { message: Option<String> },

    #[error("The request timed out. Please try again.")]
    Timeout,

    /// Connection-level failure; the detail is for logs, not for display.
    #[error("Failed to submit quote. Please try again.")]
    Transport(String),

    #[error("Server returned an invalid response. Check server logs.")]
    InvalidResponse,

    #[error("The estimate has not been completed yet")]
    NotCompleted,
}

impl SubmissionError {
    /// Whether sending the same quote again could succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Validation(_) | Self::NotCompleted)
    }
}

fn rejection_message(message: &Option<String>) -> &str {
    message
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or(GENERIC_FAILURE)
}

/// Builds the payload for a fully valid state.
///
/// The cost is taken from the state as already derived; the carpet area is
/// sent trimmed.
pub fn build_quote_request(state: &WizardState) -> Result<QuoteRequest, ValidationError> {
    validate_all(state)?;

    Ok(QuoteRequest {
        scope: state.scope.ok_or(ValidationError::MissingScope)?,
        home_type: state.home_type.ok_or(ValidationError::MissingHomeType)?,
        carpet_area: state.carpet_area.trim().to_string(),
        rooms: state.rooms.clone(),
        package: state.package.ok_or(ValidationError::MissingPackage)?,
        user_details: state.user_details.clone(),
        estimated_cost: state.estimated_cost,
        company_id: state.company_id.clone(),
        company_name: state.company_name.clone(),
    })
}

/// Validates, sends one request, and interprets the reply.
pub async fn submit(
    gateway: &dyn QuoteGateway,
    state: &WizardState,
) -> Result<Confirmation, SubmissionError> {
    let request = build_quote_request(state)?;

    let response = gateway.submit_quote(&request).await.inspect_err(|e| {
        warn!(error = ?e, "quote submission failed");
    })?;

    if !response.success {
        warn!(message = ?response.message, "quote rejected by server");
        return Err(SubmissionError::Rejected {
            message: response.message,
        });
    }

    info!(
        package = request.package.as_str(),
        estimated_cost = request.estimated_cost,
        "quote submitted"
    );
    Ok(Confirmation {
        message: Confirmation::DEFAULT_MESSAGE.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::{HomeType, Package, QuoteResponse, Scope, UserDetails};

    /// Records every request and answers with a fixed result.
    struct ScriptedGateway {
        reply: Result<QuoteResponse, SubmissionError>,
        requests: Mutex<Vec<QuoteRequest>>,
    }

    impl ScriptedGateway {
        fn replying(reply: Result<QuoteResponse, SubmissionError>) -> Self {
            Self {
                reply,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl QuoteGateway for ScriptedGateway {
        async fn submit_quote(
            &self,
            request: &QuoteRequest,
        ) -> Result<QuoteResponse, SubmissionError> {
            self.requests.lock().unwrap().push(request.clone());
            self.reply.clone()
        }
    }

    fn complete_state() -> WizardState {
        WizardState {
            scope: Some(Scope::Renovate),
            home_type: Some(HomeType::Bhk(2)),
            carpet_area: " 1000 ".to_string(),
            rooms: vec!["Kitchen".to_string(), "Bedroom 1".to_string(), "Bedroom 2".to_string()],
            package: Some(Package::Premium),
            user_details: UserDetails {
                name: "Meera".to_string(),
                email: "meera@example.com".to_string(),
                phone: "98765-43210".to_string(),
                city: "Chennai".to_string(),
            },
            estimated_cost: 500_000,
            company_id: Some("c1".to_string()),
            company_name: Some("Acme Interiors".to_string()),
        }
    }

    fn accepted() -> Result<QuoteResponse, SubmissionError> {
        Ok(QuoteResponse {
            success: true,
            message: Some("Quote submitted successfully".to_string()),
        })
    }

    // =========================================================================
    // build_quote_request
    // =========================================================================

    #[test]
    fn request_carries_every_field() {
        let request = build_quote_request(&complete_state()).unwrap();

        assert_eq!(request.scope, Scope::Renovate);
        assert_eq!(request.carpet_area, "1000");
        assert_eq!(request.estimated_cost, 500_000);
        assert_eq!(request.company_name.as_deref(), Some("Acme Interiors"));
    }

    #[test]
    fn request_serializes_in_intake_layout() {
        let request = build_quote_request(&complete_state()).unwrap();

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["homeType"], "2 BHK");
        assert_eq!(json["package"], "Premium");
        assert_eq!(json["estimatedCost"], 500_000);
        assert_eq!(json["userDetails"]["city"], "Chennai");
    }

    // =========================================================================
    // submit
    // =========================================================================

    #[tokio::test]
    async fn successful_submission_confirms() {
        let gateway = ScriptedGateway::replying(accepted());

        let confirmation = submit(&gateway, &complete_state()).await.unwrap();

        assert_eq!(confirmation.message, Confirmation::DEFAULT_MESSAGE);
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test]
    async fn invalid_state_never_reaches_the_gateway() {
        let gateway = ScriptedGateway::replying(accepted());
        let mut state = complete_state();
        state.user_details.email = "meera@".to_string();

        let err = submit(&gateway, &state).await.unwrap_err();

        assert_eq!(err, SubmissionError::Validation(ValidationError::InvalidEmail));
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn server_rejection_surfaces_server_message() {
        let gateway = ScriptedGateway::replying(Ok(QuoteResponse {
            success: false,
            message: Some("Email already used".to_string()),
        }));

        let err = submit(&gateway, &complete_state()).await.unwrap_err();

        assert_eq!(err.to_string(), "Email already used");
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn rejection_without_message_uses_generic_text() {
        let gateway = ScriptedGateway::replying(Ok(QuoteResponse {
            success: false,
            message: Some("  ".to_string()),
        }));

        let err = submit(&gateway, &complete_state()).await.unwrap_err();

        assert_eq!(err.to_string(), GENERIC_FAILURE);
    }

    #[tokio::test]
    async fn transport_errors_pass_through() {
        let gateway = ScriptedGateway::replying(Err(SubmissionError::Timeout));

        let err = submit(&gateway, &complete_state()).await.unwrap_err();

        assert_eq!(err, SubmissionError::Timeout);
    }

    #[test]
    fn transport_detail_is_not_shown_to_the_user() {
        let err = SubmissionError::Transport("dns error: no such host".to_string());

        assert_eq!(err.to_string(), GENERIC_FAILURE);
    }

    #[test]
    fn invalid_response_message() {
        assert_eq!(
            SubmissionError::InvalidResponse.to_string(),
            "Server returned an invalid response. Check server logs."
        );
    }
}
