//! Tests for response normalization and error-message extraction.

mod test_utils;

use serde_json::json;
use sqldata_client::envelope::{extract_error_message, send};
use sqldata_client::{ApiRequest, FALLBACK_ERROR_MESSAGE, ResponseEnvelope};
use sqldata_core::CancellationToken;
use sqldata_error::{SqlDataError, SqlDataErrorKind};
use test_utils::{MockTransport, error_response};

fn request() -> ApiRequest {
    ApiRequest {
        url: "https://data.example.com/sql-data-api/main/query/Customers".to_string(),
        body: json!({}),
        bearer_token: None,
    }
}

#[test]
fn test_message_field_is_preferred() {
    let message = extract_error_message(
        r#"{"message":"Invalid column 'Nme'","code":42}"#,
        "Bad Request",
    );
    assert_eq!(message, "Invalid column 'Nme'");
}

#[test]
fn test_structured_body_without_message_is_stringified() {
    let message = extract_error_message(r#"{"error":"boom"}"#, "Bad Request");
    assert_eq!(message, r#"{"error":"boom"}"#);
}

#[test]
fn test_plain_text_body_is_used_verbatim() {
    let message = extract_error_message("Table not found", "Not Found");
    assert_eq!(message, "Table not found");
}

#[test]
fn test_status_text_then_fallback() {
    assert_eq!(extract_error_message("", "Service Unavailable"), "Service Unavailable");
    assert_eq!(extract_error_message("", ""), FALLBACK_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_success_parses_body() {
    let transport = MockTransport::always(json!({"inserted": 1}));

    let envelope = send(transport.as_ref(), &request(), None).await;

    assert!(envelope.is_ok);
    assert_eq!(envelope.status, 200);
    assert_eq!(envelope.data, json!({"inserted": 1}));
    assert_eq!(envelope.error_message, None);
}

#[tokio::test]
async fn test_failed_call_carries_exact_message_into_error() {
    let transport = MockTransport::new(|_| {
        Ok(error_response(
            500,
            "Internal Server Error",
            r#"{"message":"Deadlock victim"}"#,
        ))
    });

    let envelope = send(transport.as_ref(), &request(), None).await;
    assert!(!envelope.is_ok);
    assert_eq!(envelope.error_message.as_deref(), Some("Deadlock victim"));

    let err = envelope.into_result().expect_err("Failure must raise");
    assert_eq!(
        err.kind(),
        &SqlDataErrorKind::Remote {
            status: 500,
            message: "Deadlock victim".to_string()
        }
    );
}

#[tokio::test]
async fn test_transport_failure_is_normalized() {
    let transport = MockTransport::new(|_| {
        Err(SqlDataError::new(SqlDataErrorKind::Transport(
            "connection refused".to_string(),
        )))
    });

    let envelope = send(transport.as_ref(), &request(), None).await;

    assert!(!envelope.is_ok);
    assert_eq!(envelope.status, 0);
    assert_eq!(envelope.error_message.as_deref(), Some("connection refused"));
    let err = envelope.into_result().expect_err("Failure must raise");
    assert_eq!(err.kind().message(), Some("connection refused"));
}

#[tokio::test]
async fn test_cancelled_token_skips_the_network() {
    let transport = MockTransport::always(json!(1));
    let token = CancellationToken::new();
    token.cancel();

    let envelope = send(transport.as_ref(), &request(), Some(&token)).await;

    assert!(!envelope.is_ok);
    assert_eq!(transport.request_count(), 0);
}

#[test]
fn test_into_data_deserializes() {
    let envelope = ResponseEnvelope {
        data: json!(7),
        is_ok: true,
        status: 200,
        status_text: "OK".to_string(),
        error_message: None,
    };
    let count: u64 = envelope.into_data().expect("Number body");
    assert_eq!(count, 7);
}
