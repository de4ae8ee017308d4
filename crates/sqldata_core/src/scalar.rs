//! Scalar values and their coercion into transport-safe primitives.
//!
//! Anything that crosses the wire (filter parameters, update payloads,
//! delete criteria, SQL parameters) goes through [`coerce`] first. Dates become
//! canonical strings; every other scalar passes through unchanged.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// An in-memory cell value.
#[derive(Debug, Clone, PartialEq, Default, derive_more::From)]
pub enum Scalar {
    /// SQL NULL
    #[default]
    #[from(skip)]
    Null,
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i64),
    /// Floating point
    Float(f64),
    /// Text
    Text(String),
    /// Calendar date
    Date(NaiveDate),
    /// Date and time without zone
    DateTime(NaiveDateTime),
    /// Nested array of values
    Array(Vec<Scalar>),
}

impl Scalar {
    /// Returns true if this value, or any nested value, is date-typed.
    pub fn contains_date(&self) -> bool {
        match self {
            Scalar::Date(_) | Scalar::DateTime(_) => true,
            Scalar::Array(items) => items.iter().any(Scalar::contains_date),
            _ => false,
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(i64::from(value))
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Scalar::Null)
    }
}

impl From<Value> for Scalar {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Scalar::Null,
            Value::Bool(b) => Scalar::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Scalar::Int(i),
                None => Scalar::Float(n.as_f64().unwrap_or_default()),
            },
            Value::String(s) => Scalar::Text(s),
            Value::Array(items) => Scalar::Array(items.into_iter().map(Scalar::from).collect()),
            // Objects have no scalar form; keep their JSON text.
            Value::Object(_) => Scalar::Text(value.to_string()),
        }
    }
}

/// One in-memory row keyed by field name.
pub type Record = BTreeMap<String, Scalar>;

/// A coerced row, ready to be serialized.
pub type PrimitiveRecord = Map<String, Value>;

/// Formats a date as `YYYY-MM-DD`.
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Formats a timestamp as `YYYY-MM-DDTHH:MM:SS`, adding `.mmm` only when
/// sub-second precision is present.
pub fn format_datetime(value: &NaiveDateTime) -> String {
    if value.nanosecond() == 0 {
        value.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        value.format("%Y-%m-%dT%H:%M:%S%.3f").to_string()
    }
}

/// Converts one scalar into its primitive wire form.
pub fn coerce(value: &Scalar) -> Value {
    match value {
        Scalar::Null => Value::Null,
        Scalar::Bool(b) => Value::Bool(*b),
        Scalar::Int(i) => Value::from(*i),
        // Non-finite floats have no JSON form and become null.
        Scalar::Float(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Scalar::Text(s) => Value::String(s.clone()),
        Scalar::Date(d) => Value::String(format_date(d)),
        Scalar::DateTime(dt) => Value::String(format_datetime(dt)),
        Scalar::Array(items) => Value::Array(items.iter().map(coerce).collect()),
    }
}

/// Coerces every value of a record.
///
/// # Examples
///
/// ```
/// use sqldata_core::{Record, Scalar, coerce_record};
///
/// let mut record = Record::new();
/// record.insert("a".into(), Scalar::Int(3));
/// let coerced = coerce_record(&record);
/// assert_eq!(coerced["a"], serde_json::json!(3));
/// ```
pub fn coerce_record(record: &Record) -> PrimitiveRecord {
    record
        .iter()
        .map(|(key, value)| (key.clone(), coerce(value)))
        .collect()
}

/// Coerces a list of records.
pub fn coerce_records(records: &[Record]) -> Vec<PrimitiveRecord> {
    records.iter().map(coerce_record).collect()
}
