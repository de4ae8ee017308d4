//! Query specification and its wire form.

use crate::{PrimitiveRecord, Scalar, TableName};
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kind of SQL join.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum JoinType {
    /// INNER JOIN
    InnerJoin,
    /// LEFT JOIN
    LeftJoin,
    /// RIGHT JOIN
    RightJoin,
    /// FULL JOIN
    FullJoin,
}

/// A join as authored by callers: `(type, "Table alias", condition, condition2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinEntry(pub JoinType, pub String, pub String, pub Option<String>);

impl JoinEntry {
    /// Converts into the wire form, splitting the table alias off the name.
    pub fn to_table_join(&self) -> TableJoin {
        let JoinEntry(join_type, table, condition, condition2) = self;
        let (table_name, table_alias) = TableName::parse(table).into_parts();
        TableJoin {
            table_name,
            table_alias,
            join_type: *join_type,
            join_condition: condition.clone(),
            join_condition2: condition2.clone(),
        }
    }
}

impl<T, C> From<(JoinType, T, C)> for JoinEntry
where
    T: Into<String>,
    C: Into<String>,
{
    fn from((join_type, table, condition): (JoinType, T, C)) -> Self {
        JoinEntry(join_type, table.into(), condition.into(), None)
    }
}

impl<T, C, C2> From<(JoinType, T, C, C2)> for JoinEntry
where
    T: Into<String>,
    C: Into<String>,
    C2: Into<String>,
{
    fn from((join_type, table, condition, condition2): (JoinType, T, C, C2)) -> Self {
        JoinEntry(
            join_type,
            table.into(),
            condition.into(),
            Some(condition2.into()),
        )
    }
}

/// Wire form of a join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableJoin {
    /// Joined table or view
    pub table_name: String,
    /// Alias used in join conditions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_alias: Option<String>,
    /// Join kind
    pub join_type: JoinType,
    /// ON condition
    pub join_condition: String,
    /// Secondary condition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join_condition2: Option<String>,
}

/// Declarative description of a read query.
#[derive(Debug, Clone, Default, PartialEq, Builder, Getters)]
#[builder(setter(into, strip_option), default, derive(Debug))]
pub struct QuerySpec {
    /// Comma-separated field list
    fields: Option<String>,
    /// Filter expression with `@name` parameters
    filter: Option<String>,
    /// Values for the filter parameters
    filter_params: Option<BTreeMap<String, Scalar>>,
    /// Rows to skip
    skip: Option<u64>,
    /// Maximum rows to return
    top: Option<u64>,
    /// ORDER BY expression
    order_by: Option<String>,
    /// Alias of the main table when not given with its name
    main_table_alias: Option<String>,
    /// Joins, in the order they appear in the generated SQL
    joins: Option<Vec<JoinEntry>>,
}

impl QuerySpec {
    /// Creates a new builder for QuerySpec.
    pub fn builder() -> QuerySpecBuilder {
        QuerySpecBuilder::default()
    }
}

/// Normalized read-query payload for the `query` endpoint.
///
/// Unset values are left out of the JSON body entirely; the server treats a
/// missing `top` differently from `top: 0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) select: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) filter_string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) filter_parameters: Option<PrimitiveRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) skip: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) top: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) order_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) main_table_alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) tables_join: Option<Vec<TableJoin>>,
}

impl QueryRequest {
    /// Assembles a request, dropping empty strings, zeros and empty lists.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        select: Option<String>,
        filter_string: Option<String>,
        filter_parameters: Option<PrimitiveRecord>,
        skip: Option<u64>,
        top: Option<u64>,
        order_by: Option<String>,
        main_table_alias: Option<String>,
        tables_join: Vec<TableJoin>,
    ) -> Self {
        Self {
            select: non_empty(select),
            filter_string: non_empty(filter_string),
            filter_parameters: filter_parameters.filter(|params| !params.is_empty()),
            skip: skip.filter(|n| *n > 0),
            top: top.filter(|n| *n > 0),
            order_by: non_empty(order_by),
            main_table_alias: non_empty(main_table_alias),
            tables_join: Some(tables_join).filter(|joins| !joins.is_empty()),
        }
    }
}

/// Treats blank strings as absent.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
