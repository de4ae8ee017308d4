//! Test utilities for sqldata client tests.
//!
//! This module provides a recording mock transport and response helpers.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use sqldata_client::{ApiRequest, ClientConfig, SqlDataApi, Transport, TransportResponse};
use sqldata_error::SqlDataResult;
use std::sync::{Arc, Mutex};

type Responder = dyn Fn(&ApiRequest) -> SqlDataResult<TransportResponse> + Send + Sync;

/// Transport that records every request and answers from a closure.
pub struct MockTransport {
    requests: Mutex<Vec<ApiRequest>>,
    responder: Box<Responder>,
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("requests", &self.requests)
            .finish_non_exhaustive()
    }
}

impl MockTransport {
    /// Creates a transport answering every request with `responder`.
    pub fn new(
        responder: impl Fn(&ApiRequest) -> SqlDataResult<TransportResponse> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            responder: Box::new(responder),
        })
    }

    /// Creates a transport answering every request with the same JSON body.
    pub fn always(body: Value) -> Arc<Self> {
        Self::new(move |_| Ok(ok_json(&body)))
    }

    /// Requests seen so far.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    /// Number of requests seen so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().expect("requests lock").len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post(&self, request: &ApiRequest) -> SqlDataResult<TransportResponse> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(request.clone());
        (self.responder)(request)
    }
}

/// A 200 response with a JSON body.
pub fn ok_json(body: &Value) -> TransportResponse {
    TransportResponse {
        status: 200,
        status_text: "OK".to_string(),
        body: body.to_string(),
    }
}

/// A failed response with the given status, reason and raw body.
pub fn error_response(status: u16, status_text: &str, body: &str) -> TransportResponse {
    TransportResponse {
        status,
        status_text: status_text.to_string(),
        body: body.to_string(),
    }
}

/// Decoded query string pairs of `url`.
pub fn query_pairs(url: &str) -> Vec<(String, String)> {
    reqwest::Url::parse(url)
        .expect("Valid URL")
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Configuration pointing at a fake server.
pub fn test_config() -> ClientConfig {
    ClientConfig::builder()
        .base_url("https://data.example.com/")
        .connection_name("main")
        .build()
        .expect("Valid test config")
}

/// Client over the given mock transport.
pub fn test_api(transport: &Arc<MockTransport>) -> SqlDataApi {
    SqlDataApi::with_transport(test_config(), transport.clone())
}
