use estimator_core::{QuoteResponse, SubmissionError};
use reqwest::StatusCode;

/// Reads the reply to a quote submission.
///
/// A 2xx reply must carry a JSON `{ success, message? }` body, otherwise the
/// reply is [`SubmissionError::InvalidResponse`]. Any other status is a
/// rejection carrying the server's `message` when the body has one. A
/// decoded 2xx body is returned as-is; deciding on `success` is left to the
/// submission handler.
pub fn interpret_quote_response(
    status: StatusCode,
    body: &str,
) -> Result<QuoteResponse, SubmissionError> {
    let decoded = serde_json::from_str::<QuoteResponse>(body);

    if status.is_success() {
        return decoded.map_err(|_| SubmissionError::InvalidResponse);
    }

    Err(SubmissionError::Rejected {
        message: decoded.ok().and_then(|r| r.message),
    })
}
