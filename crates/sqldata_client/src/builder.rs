//! Fluent query front end.
//!
//! A [`TableQuery`] is consumed by its terminal call, so nothing configured on
//! one query can leak into the next.

use crate::SqlDataApi;
use sqldata_core::{DataTable, JoinEntry, JoinType, QuerySpec, QuerySpecBuilder, Record, Scalar};
use sqldata_error::{SqlDataError, SqlDataErrorKind, SqlDataResult};
use std::collections::BTreeMap;

/// A query against one table or view, built step by step.
///
/// # Examples
///
/// ```no_run
/// # async fn run(api: sqldata_client::SqlDataApi) -> sqldata_error::SqlDataResult<()> {
/// let rows = api
///     .table("Customers c")
///     .select("c.Id, c.Name, o.Total")
///     .filter("c.Country = @country")
///     .param("country", "NZ")
///     .inner_join("Orders o", "o.CustomerId = c.Id")
///     .order_by("c.Name")
///     .top(50)
///     .to_list()
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TableQuery<'a> {
    api: &'a SqlDataApi,
    table: String,
    spec: QuerySpecBuilder,
    params: BTreeMap<String, Scalar>,
    joins: Vec<JoinEntry>,
}

impl<'a> TableQuery<'a> {
    pub(crate) fn new(api: &'a SqlDataApi, table: impl Into<String>) -> Self {
        Self {
            api,
            table: table.into(),
            spec: QuerySpec::builder(),
            params: BTreeMap::new(),
            joins: Vec::new(),
        }
    }

    /// Comma-separated fields to return.
    pub fn select(mut self, fields: impl Into<String>) -> Self {
        self.spec.fields(fields);
        self
    }

    /// Filter expression; reference parameters as `@name`.
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.spec.filter(filter);
        self
    }

    /// Filter expression together with all of its parameters.
    pub fn filter_with(mut self, filter: impl Into<String>, params: Record) -> Self {
        self.spec.filter(filter);
        self.params.extend(params);
        self
    }

    /// Adds one filter parameter.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// ORDER BY expression.
    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.spec.order_by(order_by);
        self
    }

    /// Rows to skip.
    pub fn skip(mut self, skip: u64) -> Self {
        self.spec.skip(skip);
        self
    }

    /// Maximum rows to return.
    pub fn top(mut self, top: u64) -> Self {
        self.spec.top(top);
        self
    }

    /// Alias for the main table when it is not part of the table name.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.spec.main_table_alias(alias);
        self
    }

    /// Appends a join. Joins are emitted in the order they are added.
    pub fn join(mut self, entry: impl Into<JoinEntry>) -> Self {
        self.joins.push(entry.into());
        self
    }

    /// Appends an INNER JOIN.
    pub fn inner_join(self, table: impl Into<String>, condition: impl Into<String>) -> Self {
        self.join(JoinEntry(JoinType::InnerJoin, table.into(), condition.into(), None))
    }

    /// Appends a LEFT JOIN.
    pub fn left_join(self, table: impl Into<String>, condition: impl Into<String>) -> Self {
        self.join(JoinEntry(JoinType::LeftJoin, table.into(), condition.into(), None))
    }

    /// Appends a RIGHT JOIN.
    pub fn right_join(self, table: impl Into<String>, condition: impl Into<String>) -> Self {
        self.join(JoinEntry(JoinType::RightJoin, table.into(), condition.into(), None))
    }

    /// Appends a FULL JOIN.
    pub fn full_join(self, table: impl Into<String>, condition: impl Into<String>) -> Self {
        self.join(JoinEntry(JoinType::FullJoin, table.into(), condition.into(), None))
    }

    /// Freezes the builder into a [`QuerySpec`].
    pub fn to_spec(&self) -> SqlDataResult<QuerySpec> {
        let mut spec = self.spec.clone();
        if !self.params.is_empty() {
            spec.filter_params(self.params.clone());
        }
        if !self.joins.is_empty() {
            spec.joins(self.joins.clone());
        }
        spec.build()
            .map_err(|e| SqlDataError::new(SqlDataErrorKind::InvalidArgument(e.to_string())))
    }

    /// Runs the query and returns rows as records.
    pub async fn to_list(self) -> SqlDataResult<Vec<Record>> {
        Ok(self.to_table().await?.to_records())
    }

    /// Runs the query and returns the columnar table.
    pub async fn to_table(self) -> SqlDataResult<DataTable> {
        let spec = self.to_spec()?;
        self.api.query_table(&self.table, Some(spec.into()), None).await
    }

    /// Runs the query with `top = 1` and returns the first row, if any.
    pub async fn first_or_default(mut self) -> SqlDataResult<Option<Record>> {
        self.spec.top(1u64);
        Ok(self.to_list().await?.into_iter().next())
    }
}
