//! Raw SQL and stored procedure execution payloads.

use crate::{DataTable, PrimitiveRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How the server should interpret the `sql` text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum CommandType {
    /// A SQL statement
    Text,
    /// The name of a stored procedure
    StoredProcedure,
}

impl CommandType {
    /// A bare identifier is a procedure name; anything containing a space is
    /// a statement.
    pub fn infer(sql: &str) -> Self {
        if sql.trim().contains(' ') {
            CommandType::Text
        } else {
            CommandType::StoredProcedure
        }
    }
}

/// Direction of a stored procedure parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum ParamDirection {
    /// Input only
    Input,
    /// Output only
    Output,
    /// Both
    InputOutput,
}

/// Body of an `execute` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteRequest {
    /// Statement or procedure
    pub command_type: CommandType,
    /// SQL text or procedure name
    pub sql: String,
    /// Coerced parameters
    pub params: PrimitiveRecord,
    /// Directions for non-input parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param_directions: Option<BTreeMap<String, ParamDirection>>,
}

/// Result of an `execute` request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SqlResult {
    /// Result set in columnar form
    pub table: Option<DataTable>,
    /// Result set as objects
    pub items: Option<Vec<PrimitiveRecord>>,
    /// Values of output parameters
    pub output_parameters: Option<PrimitiveRecord>,
    /// Server-reported result kind
    pub result_type: Option<String>,
}
