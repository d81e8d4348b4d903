//! # External AI Collaborators
//!
//! Traits for the completion and transcription providers the pipeline calls,
//! their reqwest-based implementations, and a factory that builds them from
//! configuration.

pub mod ai;
pub mod factory;
pub mod transcription;

use crate::errors::ProviderError;
use reqwest::Response;

/// Passes a successful response through and maps failures onto [`ProviderError`].
///
/// `429` becomes [`ProviderError::RateLimited`]; any other non-success status
/// becomes [`ProviderError::AiApi`] carrying the response body.
pub(crate) async fn check_status(response: Response) -> Result<Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    if status.as_u16() == 429 {
        return Err(ProviderError::RateLimited(body));
    }
    Err(ProviderError::AiApi {
        status: status.as_u16(),
        body,
    })
}
