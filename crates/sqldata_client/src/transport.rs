//! The network seam: one POST in, one raw response out.

use crate::ClientConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use sqldata_error::{SqlDataError, SqlDataErrorKind, SqlDataResult};
use std::time::Duration;
use tracing::{debug, error, instrument};

/// A fully shaped request: target URL, JSON body and optional bearer token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiRequest {
    /// Absolute URL, including any access-token query parameter
    pub url: String,
    /// JSON body
    pub body: Value,
    /// Bearer token for the `Authorization` header
    pub bearer_token: Option<String>,
}

/// Raw HTTP outcome before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Reason phrase
    pub status_text: String,
    /// Response body text
    pub body: String,
}

impl TransportResponse {
    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests to the SQL data API.
///
/// Implementations only move bytes. An `Err` means no HTTP response was
/// received at all; any response, including 4xx and 5xx, is an `Ok`.
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// POSTs the request and returns the raw response.
    async fn post(&self, request: &ApiRequest) -> SqlDataResult<TransportResponse>;
}

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport honoring the configured timeout.
    pub fn new(config: &ClientConfig) -> SqlDataResult<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs() {
            builder = builder.timeout(Duration::from_secs(*secs));
        }
        let client = builder.build().map_err(|e| {
            SqlDataError::new(SqlDataErrorKind::Transport(format!(
                "Failed to build HTTP client: {}",
                e
            )))
        })?;
        Ok(Self { client })
    }

    /// Wraps an existing reqwest client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(url = %request.url))]
    async fn post(&self, request: &ApiRequest) -> SqlDataResult<TransportResponse> {
        let mut builder = self.client.post(&request.url).json(&request.body);
        if let Some(token) = &request.bearer_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|e| {
            error!(error = ?e, "HTTP request failed");
            SqlDataError::new(SqlDataErrorKind::Transport(format!("Request failed: {}", e)))
        })?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or_default().to_string();
        let body = response.text().await.map_err(|e| {
            error!(error = ?e, "Failed to read response body");
            SqlDataError::new(SqlDataErrorKind::Transport(format!(
                "Failed to read response body: {}",
                e
            )))
        })?;

        debug!(status = status.as_u16(), bytes = body.len(), "Received response");

        Ok(TransportResponse {
            status: status.as_u16(),
            status_text,
            body,
        })
    }
}
