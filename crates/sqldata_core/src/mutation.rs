//! Payloads for filtered updates and deletes.

use crate::PrimitiveRecord;
use crate::query::non_empty;
use serde::{Deserialize, Serialize};

/// A filter expression with its coerced parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRequest {
    /// Filter expression
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_string: Option<String>,
    /// Values for `@name` parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_parameters: Option<PrimitiveRecord>,
}

impl FilterRequest {
    /// Builds a filter, dropping a blank expression and empty parameters.
    pub fn new(filter_string: Option<String>, filter_parameters: Option<PrimitiveRecord>) -> Self {
        Self {
            filter_string: non_empty(filter_string),
            filter_parameters: filter_parameters.filter(|params| !params.is_empty()),
        }
    }
}

/// Body of an `update-data` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    /// Coerced column values to set
    pub update_properties: PrimitiveRecord,
    /// Rows to update
    pub filter: FilterRequest,
}
