//! Tests for save options and status arithmetic.

use serde_json::json;
use sqldata_core::{DEFAULT_BATCH_SIZE, SaveMethod, SaveOptions, SaveRequest, SaveStatus};

fn status(inserted: u64, updated: u64, deleted: u64) -> SaveStatus {
    SaveStatus {
        inserted,
        updated,
        deleted,
    }
}

#[test]
fn test_defaults() {
    let options = SaveOptions::default();
    assert_eq!(*options.method(), SaveMethod::Merge);
    assert_eq!(*options.batch_size(), DEFAULT_BATCH_SIZE);
    assert!(options.primary_keys().is_none());
    assert!(options.cancellation().is_none());
}

#[test]
fn test_status_sums_field_wise() {
    let mut total = SaveStatus::default();
    total += status(2, 1, 0);
    let total = total + status(1, 0, 4);

    assert_eq!(total, status(3, 1, 4));
}

#[test]
fn test_status_sum_saturates() {
    let mut total = status(u64::MAX, 0, 0);
    total += status(1, 2, 0);

    assert_eq!(total, status(u64::MAX, 2, 0));
}

#[test]
fn test_partial_status_body_defaults_missing_counts() {
    let parsed: SaveStatus = serde_json::from_value(json!({"inserted": 5})).expect("Valid status");
    assert_eq!(parsed, status(5, 0, 0));
}

#[test]
fn test_empty_request_serializes_to_empty_object() {
    let body = serde_json::to_value(SaveRequest::default()).expect("Serializable");
    assert_eq!(body, json!({}));
}
