//! Turns a table name plus a field list and/or [`QuerySpec`] into a
//! [`QueryRequest`].

use sqldata_core::{QueryRequest, QuerySpec, TableName, coerce_record, non_empty};
use sqldata_error::{SqlDataError, SqlDataErrorKind, SqlDataResult};
use tracing::{debug, instrument};

/// The wildcard field list; equivalent to not selecting fields at all.
pub const ALL_FIELDS: &str = "*";

/// Second argument of a query call: either a field list or a whole spec.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldsOrSpec {
    /// Comma-separated field list
    Fields(String),
    /// Declarative query spec
    Spec(QuerySpec),
}

impl From<&str> for FieldsOrSpec {
    fn from(fields: &str) -> Self {
        FieldsOrSpec::Fields(fields.to_string())
    }
}

impl From<String> for FieldsOrSpec {
    fn from(fields: String) -> Self {
        FieldsOrSpec::Fields(fields)
    }
}

impl From<QuerySpec> for FieldsOrSpec {
    fn from(spec: QuerySpec) -> Self {
        FieldsOrSpec::Spec(spec)
    }
}

/// Builds the wire request for a read query.
///
/// An explicit `spec` wins over a spec passed as `fields_or_spec`. A field
/// list passed as `fields_or_spec` wins over `spec.fields` unless it is empty
/// or `"*"`. The alias parsed from `table_or_view` wins over
/// `spec.main_table_alias`.
///
/// # Errors
///
/// `InvalidArgument` if `table_or_view` is blank.
#[instrument(skip(fields_or_spec, spec))]
pub fn translate_query(
    table_or_view: &str,
    fields_or_spec: Option<FieldsOrSpec>,
    spec: Option<QuerySpec>,
) -> SqlDataResult<QueryRequest> {
    if table_or_view.trim().is_empty() {
        return Err(SqlDataError::new(SqlDataErrorKind::InvalidArgument(
            "table or view name is empty".to_string(),
        )));
    }

    let (explicit_fields, embedded_spec) = match fields_or_spec {
        Some(FieldsOrSpec::Fields(fields)) => (Some(fields), None),
        Some(FieldsOrSpec::Spec(spec)) => (None, Some(spec)),
        None => (None, None),
    };
    let spec = spec.or(embedded_spec).unwrap_or_default();

    let fields = explicit_fields
        .filter(|f| !f.trim().is_empty() && f.trim() != ALL_FIELDS)
        .or_else(|| spec.fields().clone());

    let (_, parsed_alias) = TableName::parse(table_or_view).into_parts();
    let main_table_alias = non_empty(parsed_alias).or_else(|| spec.main_table_alias().clone());

    let tables_join = spec
        .joins()
        .iter()
        .flatten()
        .map(|entry| entry.to_table_join())
        .collect::<Vec<_>>();

    let filter_parameters = spec.filter_params().as_ref().map(coerce_record);

    debug!(
        joins = tables_join.len(),
        has_filter = spec.filter().is_some(),
        "Translated query"
    );

    Ok(QueryRequest::new(
        fields,
        spec.filter().clone(),
        filter_parameters,
        *spec.skip(),
        *spec.top(),
        spec.order_by().clone(),
        main_table_alias,
        tables_join,
    ))
}
