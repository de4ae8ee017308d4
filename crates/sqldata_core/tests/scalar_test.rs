//! Tests for scalar coercion.

use chrono::NaiveDate;
use serde_json::{Value, json};
use sqldata_core::{Record, Scalar, coerce, coerce_record, format_datetime};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("Valid date")
}

#[test]
fn test_dates_inside_arrays_are_formatted() {
    let mut record = Record::new();
    record.insert("a".into(), Scalar::Int(3));
    record.insert(
        "b".into(),
        Scalar::Array(vec![
            Scalar::Date(date(2024, 1, 2)),
            Scalar::Date(date(2024, 2, 29)),
        ]),
    );
    record.insert("c".into(), Scalar::from("x"));

    let coerced = Value::Object(coerce_record(&record));

    assert_eq!(
        coerced,
        json!({"a": 3, "b": ["2024-01-02", "2024-02-29"], "c": "x"})
    );
}

#[test]
fn test_coercion_is_idempotent() {
    let mut record = Record::new();
    record.insert("when".into(), Scalar::Date(date(2023, 12, 31)));
    record.insert("flag".into(), Scalar::Bool(true));
    record.insert("missing".into(), Scalar::Null);

    let once = coerce_record(&record);
    let again: Record = once
        .clone()
        .into_iter()
        .map(|(k, v)| (k, Scalar::from(v)))
        .collect();

    assert_eq!(coerce_record(&again), once);
}

#[test]
fn test_datetime_keeps_millis_only_when_present() {
    let whole = date(2024, 5, 6).and_hms_opt(7, 8, 9).expect("Valid time");
    let fractional = date(2024, 5, 6)
        .and_hms_milli_opt(7, 8, 9, 250)
        .expect("Valid time");

    assert_eq!(format_datetime(&whole), "2024-05-06T07:08:09");
    assert_eq!(format_datetime(&fractional), "2024-05-06T07:08:09.250");
    assert_eq!(coerce(&Scalar::DateTime(whole)), json!("2024-05-06T07:08:09"));
}

#[test]
fn test_non_date_values_pass_through() {
    assert_eq!(coerce(&Scalar::Null), Value::Null);
    assert_eq!(coerce(&Scalar::Float(1.5)), json!(1.5));
    assert_eq!(coerce(&Scalar::Float(f64::NAN)), Value::Null);
    assert_eq!(coerce(&Scalar::from(Some(4))), json!(4));
    assert_eq!(coerce(&Scalar::from(None::<i64>)), Value::Null);
}

#[test]
fn test_contains_date_looks_into_arrays() {
    let nested = Scalar::Array(vec![
        Scalar::Int(1),
        Scalar::Array(vec![Scalar::Date(date(2020, 1, 1))]),
    ]);
    assert!(nested.contains_date());
    assert!(!Scalar::from("2020-01-01").contains_date());
}
