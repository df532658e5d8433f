use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use url::Url;

#[derive(Debug, Clone)]
pub struct GraphSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("timeout")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("unreadable body: {0}")]
    Body(String),
}

#[async_trait::async_trait]
pub trait CountFetcher: Send + Sync {
    async fn fetch_engagement(&self, request: &Url) -> Result<Value, FetchError>;
}

/// Graph API fetcher backed by reqwest.
#[derive(Debug, Clone)]
pub struct GraphFetcher {
    settings: GraphSettings,
}

impl GraphFetcher {
    pub fn new(settings: GraphSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, FetchError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| FetchError::Network(err.to_string()))
    }
}

#[async_trait::async_trait]
impl CountFetcher for GraphFetcher {
    async fn fetch_engagement(&self, request: &Url) -> Result<Value, FetchError> {
        let client = self.build_client()?;

        let response = client
            .get(request.as_str())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_reqwest_error)?;

        // The provider ships error payloads (including the token-invalidated
        // code) with non-2xx statuses, so the body is decoded regardless of
        // status and the status only matters when the body is not JSON.
        match serde_json::from_str::<Value>(&body) {
            Ok(value) => Ok(value),
            Err(_) if !status.is_success() => Err(FetchError::HttpStatus(status.as_u16())),
            Err(err) => Err(FetchError::Body(err.to_string())),
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::Timeout;
    }
    FetchError::Network(err.to_string())
}
