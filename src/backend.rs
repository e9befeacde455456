//! A client for the alert backend's HTTP API.

use crate::core::{AlertBackend, AlertRequest, AlertResponse, SubscriberListResponse};
use crate::errors::BackendError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument};

pub const SUBSCRIBERS_PATH: &str = "/api/subscribers";
pub const ALERT_PATH: &str = "/api/alert";

/// Talks to the backend at a fixed base URL.
///
/// No request timeout is configured; calls wait for the transport to settle.
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    /// Creates a new `HttpBackend` rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Reads the whole body and decodes it, keeping decode errors apart from
    /// transport errors.
    async fn decode<T: DeserializeOwned>(
        url: &str,
        response: reqwest::Response,
    ) -> Result<T, BackendError> {
        let body = response
            .bytes()
            .await
            .map_err(|source| BackendError::Transport {
                url: url.to_string(),
                source,
            })?;
        serde_json::from_slice(&body).map_err(|source| BackendError::Parse {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl AlertBackend for HttpBackend {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch_subscribers(&self) -> Result<SubscriberListResponse, BackendError> {
        let url = self.endpoint(SUBSCRIBERS_PATH);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| BackendError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(status = %status, "Subscriber fetch returned a non-success status");
            return Err(BackendError::Status { url, status });
        }

        let list: SubscriberListResponse = Self::decode(&url, response).await?;
        debug!(count = list.subscribers.len(), "Fetched subscribers");
        Ok(list)
    }

    #[instrument(skip(self, request), fields(base_url = %self.base_url, len = request.message.len()))]
    async fn send_alert(&self, request: &AlertRequest) -> Result<AlertResponse, BackendError> {
        let url = self.endpoint(ALERT_PATH);
        // `.json()` sets `Content-Type: application/json`.
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|source| BackendError::Transport {
                url: url.clone(),
                source,
            })?;

        debug!(status = %response.status(), "Alert endpoint responded");
        Self::decode(&url, response).await
    }
}
