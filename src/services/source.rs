use crate::models::{ProfileRecord, ProfilesResponse};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when fetching profiles
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Anything that can hand over the full set of profile records
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch_profiles(&self) -> Result<Vec<ProfileRecord>, SourceError>;
}

/// Profile feed served over HTTP as `{"users": [...]}`
pub struct HttpProfileSource {
    url: String,
    client: Client,
}

impl HttpProfileSource {
    /// Create a new feed client
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ProfileSource for HttpProfileSource {
    async fn fetch_profiles(&self) -> Result<Vec<ProfileRecord>, SourceError> {
        tracing::debug!("Fetching profiles from: {}", self.url);

        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Failed to fetch profiles: {} - {}", status, body);
            return Err(SourceError::ApiError(format!(
                "Failed to fetch profiles: {}",
                status
            )));
        }

        let body = response.text().await?;
        let parsed: ProfilesResponse = serde_json::from_str(&body)
            .map_err(|e| SourceError::InvalidResponse(format!("Failed to parse profiles: {}", e)))?;

        tracing::debug!("Fetched {} profile records", parsed.users.len());

        Ok(parsed.users)
    }
}
