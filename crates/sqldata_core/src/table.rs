//! Column-oriented table representation used on the wire.

use crate::{Record, Scalar, coerce};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

/// A `{fieldNames, rows}` table; each row is aligned to `field_names`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataTable {
    /// Column names
    pub field_names: Vec<String>,
    /// Positional rows
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
}

impl DataTable {
    /// Builds a columnar table from records.
    ///
    /// Field names are the union of all record keys; a record missing a field
    /// contributes `null` in that column. Values are coerced on the way in.
    pub fn from_records(records: &[Record]) -> Self {
        let field_names: Vec<String> = records
            .iter()
            .flat_map(|record| record.keys().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let rows = records
            .iter()
            .map(|record| {
                field_names
                    .iter()
                    .map(|field| record.get(field).map(coerce).unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Self { field_names, rows }
    }

    /// Converts rows back into records.
    pub fn to_records(&self) -> Vec<Record> {
        self.rows
            .iter()
            .map(|row| {
                self.field_names
                    .iter()
                    .zip(row.iter())
                    .map(|(field, value)| (field.clone(), Scalar::from(value.clone())))
                    .collect()
            })
            .collect()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
