use crate::models::{MatchPair, ValidateMatchesRequest, ValidateMatchesResponse};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when calling the match validation service
#[derive(Debug, Error)]
pub enum ValidatorError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// External oracle that accepts or rejects a proposed pair
#[async_trait]
pub trait MatchValidator: Send + Sync {
    /// `Ok(true)` when the pair is accepted, `Ok(false)` when rejected
    async fn validate(&self, pair: &MatchPair) -> Result<bool, ValidatorError>;
}

/// Match validation service reached over HTTP
///
/// Posts `{"matches": [{"user1_id": .., "user2_id": ..}]}` and reads the
/// `success` flag of the reply. Server errors and unreadable bodies are
/// failures, not rejections.
pub struct HttpMatchValidator {
    url: String,
    client: Client,
}

impl HttpMatchValidator {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ValidatorError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl MatchValidator for HttpMatchValidator {
    async fn validate(&self, pair: &MatchPair) -> Result<bool, ValidatorError> {
        let request = ValidateMatchesRequest {
            matches: vec![pair.clone()],
        };

        let response = self.client.post(&self.url).json(&request).send().await?;
        let status = response.status();

        if status.is_server_error() {
            return Err(ValidatorError::ApiError(format!(
                "Validator returned {} for {}",
                status, pair
            )));
        }

        let body = response.text().await?;
        let parsed: ValidateMatchesResponse = serde_json::from_str(&body).map_err(|e| {
            ValidatorError::InvalidResponse(format!(
                "Failed to parse validator reply ({}): {}",
                status, e
            ))
        })?;

        if let Some(message) = &parsed.message {
            tracing::debug!("Validator answered {} for {}: {}", parsed.success, pair, message);
        } else {
            tracing::debug!("Validator answered {} for {}", parsed.success, pair);
        }

        Ok(parsed.success)
    }
}
