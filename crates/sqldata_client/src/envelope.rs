//! Uniform success/failure envelope around one network call.
//!
//! [`send`] never fails: transport errors, non-2xx responses and cancelled
//! calls all come back as an envelope with `is_ok == false` and a
//! best-effort `error_message`. Call sites turn that into an error with
//! [`ResponseEnvelope::into_result`], so the translation happens in one place.

use crate::{ApiRequest, Transport};
use serde::de::DeserializeOwned;
use serde_json::Value;
use sqldata_error::{SqlDataError, SqlDataErrorKind, SqlDataResult};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

/// Used when neither the body nor the status text say anything.
pub const FALLBACK_ERROR_MESSAGE: &str = "Request failed";

/// Outcome of one round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    /// Parsed response body (`Null` on failure or empty body)
    pub data: Value,
    /// True for 2xx responses
    pub is_ok: bool,
    /// HTTP status; 0 when no response was received
    pub status: u16,
    /// Reason phrase
    pub status_text: String,
    /// Message extracted from a failure
    pub error_message: Option<String>,
}

impl ResponseEnvelope {
    /// Envelope for a call that never produced a response.
    pub fn transport_failure(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            data: Value::Null,
            is_ok: false,
            status: 0,
            status_text: String::new(),
            error_message: Some(if message.trim().is_empty() {
                FALLBACK_ERROR_MESSAGE.to_string()
            } else {
                message
            }),
        }
    }

    /// Converts a failed envelope into an error carrying its message.
    #[track_caller]
    pub fn into_result(self) -> SqlDataResult<Value> {
        if self.is_ok {
            return Ok(self.data);
        }
        let message = self
            .error_message
            .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());
        let kind = if self.status == 0 {
            SqlDataErrorKind::Transport(message)
        } else {
            SqlDataErrorKind::Remote {
                status: self.status,
                message,
            }
        };
        Err(SqlDataError::new(kind))
    }

    /// Like [`into_result`](Self::into_result), then deserializes the body.
    #[track_caller]
    pub fn into_data<T: DeserializeOwned>(self) -> SqlDataResult<T> {
        let data = self.into_result()?;
        Ok(serde_json::from_value(data)?)
    }
}

/// Parses a body as JSON, falling back to a JSON string of the raw text.
pub fn parse_body(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

/// Picks the most useful message from a failed response.
///
/// Order: the body's `message` field, the whole body (structured bodies are
/// re-serialized), the status text, then [`FALLBACK_ERROR_MESSAGE`].
pub fn extract_error_message(body: &str, status_text: &str) -> String {
    let from_body = match parse_body(body) {
        Value::Null => None,
        Value::Object(map) => match map.get("message") {
            Some(Value::String(message)) if !message.trim().is_empty() => Some(message.clone()),
            _ => Some(Value::Object(map).to_string()),
        },
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    };

    from_body
        .filter(|message| !message.trim().is_empty())
        .or_else(|| Some(status_text.to_string()).filter(|s| !s.trim().is_empty()))
        .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string())
}

/// Executes one request and normalizes the outcome.
///
/// A token that is already cancelled short-circuits before anything is sent;
/// a request that is in flight is allowed to complete.
#[instrument(skip(transport, request, cancellation), fields(url = %request.url))]
pub async fn send(
    transport: &dyn Transport,
    request: &ApiRequest,
    cancellation: Option<&CancellationToken>,
) -> ResponseEnvelope {
    if cancellation.is_some_and(|token| token.is_cancelled()) {
        warn!("Request cancelled before sending");
        return ResponseEnvelope::transport_failure("Request was cancelled");
    }

    match transport.post(request).await {
        Ok(response) if response.is_success() => {
            debug!(status = response.status, "Request succeeded");
            ResponseEnvelope {
                data: parse_body(&response.body),
                is_ok: true,
                status: response.status,
                status_text: response.status_text,
                error_message: None,
            }
        }
        Ok(response) => {
            let message = extract_error_message(&response.body, &response.status_text);
            warn!(status = response.status, error = %message, "Request returned an error status");
            ResponseEnvelope {
                data: Value::Null,
                is_ok: false,
                status: response.status,
                status_text: response.status_text,
                error_message: Some(message),
            }
        }
        Err(err) => {
            warn!(error = %err, "Transport failure");
            let message = err
                .kind()
                .message()
                .map(str::to_string)
                .unwrap_or_else(|| err.kind().to_string());
            ResponseEnvelope::transport_failure(message)
        }
    }
}
