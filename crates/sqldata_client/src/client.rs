//! The SQL data API client.

use crate::{
    ApiRequest, ClientConfig, FieldsOrSpec, HttpTransport, ResponseEnvelope, TableQuery,
    Transport, batch, envelope, translate_query,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqldata_core::{
    CommandType, DataTable, ExecuteRequest, FilterRequest, ParamDirection, PrimitiveRecord,
    QuerySpec, Record, SaveOptions, SaveStatus, SqlResult, TableName, UpdateRequest,
    coerce_record,
};
use sqldata_error::{SqlDataError, SqlDataErrorKind, SqlDataResult};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

/// Client for one connection of a remote SQL data API.
///
/// Configuration is owned by the instance; two clients never share tokens.
#[derive(Debug, Clone)]
pub struct SqlDataApi {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    cancellation: Option<CancellationToken>,
}

#[derive(Debug, Serialize)]
struct AuthenticateRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct AuthenticateResponse {
    token: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct QueryResponse {
    table: Option<DataTable>,
    items: Option<Vec<PrimitiveRecord>>,
}

impl SqlDataApi {
    /// Creates a client using the reqwest transport.
    #[instrument(
        skip(config),
        fields(base_url = %config.base_url(), connection = %config.connection_name())
    )]
    pub fn new(config: ClientConfig) -> SqlDataResult<Self> {
        let transport = HttpTransport::new(&config)?;
        debug!("Created SQL data API client");
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Creates a client over a custom transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            transport,
            cancellation: None,
        }
    }

    /// Attaches a cancellation token used by calls that do not bring their own.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the client-level cancellation token.
    pub fn cancellation(&self) -> Option<&CancellationToken> {
        self.cancellation.as_ref()
    }

    /// Authenticates and stores the returned token as this client's bearer token.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&mut self, username: &str, password: &str) -> SqlDataResult<()> {
        if username.trim().is_empty() {
            return Err(SqlDataError::new(SqlDataErrorKind::InvalidArgument(
                "username is empty".to_string(),
            )));
        }
        let request = ApiRequest {
            url: self.config.authenticate_url()?,
            body: serde_json::to_value(AuthenticateRequest { username, password })?,
            bearer_token: None,
        };
        let response: AuthenticateResponse =
            envelope::send(self.transport.as_ref(), &request, self.cancellation.as_ref())
                .await
                .into_data()?;

        self.config = self.config.clone().with_bearer_token(response.token);
        info!("Authenticated");
        Ok(())
    }

    /// Starts a fluent query against `table_or_view` (`"Table"` or `"Table alias"`).
    pub fn table(&self, table_or_view: impl Into<String>) -> TableQuery<'_> {
        TableQuery::new(self, table_or_view)
    }

    /// Runs a read query and returns rows as records.
    ///
    /// `fields_or_spec` is either a field list or a [`QuerySpec`]; an explicit
    /// `spec` takes precedence over one passed in second position.
    pub async fn query(
        &self,
        table_or_view: &str,
        fields_or_spec: Option<FieldsOrSpec>,
        spec: Option<QuerySpec>,
    ) -> SqlDataResult<Vec<Record>> {
        Ok(self
            .query_table(table_or_view, fields_or_spec, spec)
            .await?
            .to_records())
    }

    /// Runs a read query and returns the columnar table.
    #[instrument(skip(self, fields_or_spec, spec))]
    pub async fn query_table(
        &self,
        table_or_view: &str,
        fields_or_spec: Option<FieldsOrSpec>,
        spec: Option<QuerySpec>,
    ) -> SqlDataResult<DataTable> {
        let request = translate_query(table_or_view, fields_or_spec, spec)?;
        self.config.validate()?;
        let table_name = TableName::parse(table_or_view);

        let data = self
            .post(
                "query",
                Some(table_name.name().as_str()),
                &request,
                self.cancellation.as_ref(),
            )
            .await?
            .into_result()?;
        let table = into_data_table(data)?;
        debug!(rows = table.len(), "Query returned");
        Ok(table)
    }

    /// Saves rows and deletes `items_to_delete`, batching as needed.
    pub async fn save(
        &self,
        table: &str,
        items: &[Record],
        items_to_delete: &[Record],
        options: SaveOptions,
    ) -> SqlDataResult<SaveStatus> {
        batch::persist(self, table, items, items_to_delete, &options).await
    }

    /// Updates rows matching `filter` and returns the affected row count.
    #[instrument(skip(self, update_properties, filter_params))]
    pub async fn update(
        &self,
        table: &str,
        update_properties: &Record,
        filter: &str,
        filter_params: &Record,
    ) -> SqlDataResult<u64> {
        let table = table_segment(table)?;
        let body = UpdateRequest {
            update_properties: coerce_record(update_properties),
            filter: FilterRequest::new(
                Some(filter.to_string()),
                Some(coerce_record(filter_params)),
            ),
        };
        let count: u64 = self
            .post("update-data", Some(&table), &body, self.cancellation.as_ref())
            .await?
            .into_data()?;
        info!(count, "Rows updated");
        Ok(count)
    }

    /// Deletes rows matching `filter` and returns the affected row count.
    #[instrument(skip(self, filter_params))]
    pub async fn delete(
        &self,
        table: &str,
        filter: &str,
        filter_params: &Record,
    ) -> SqlDataResult<u64> {
        let table = table_segment(table)?;
        let body = FilterRequest::new(Some(filter.to_string()), Some(coerce_record(filter_params)));
        let count: u64 = self
            .post("delete-from", Some(&table), &body, self.cancellation.as_ref())
            .await?
            .into_data()?;
        info!(count, "Rows deleted");
        Ok(count)
    }

    /// Inserts one record and returns the generated identity value.
    #[instrument(skip(self, record))]
    pub async fn save_with_auto_id(&self, table: &str, record: &Record) -> SqlDataResult<i64> {
        let table = table_segment(table)?;
        let id: i64 = self
            .post(
                "save-with-autoid",
                Some(&table),
                &coerce_record(record),
                self.cancellation.as_ref(),
            )
            .await?
            .into_data()?;
        debug!(id, "Record inserted");
        Ok(id)
    }

    /// Runs a SQL statement or, when `sql` has no spaces, a stored procedure.
    #[instrument(skip(self, params, param_directions))]
    pub async fn execute(
        &self,
        sql: &str,
        params: &Record,
        param_directions: Option<BTreeMap<String, ParamDirection>>,
    ) -> SqlDataResult<SqlResult> {
        if sql.trim().is_empty() {
            return Err(SqlDataError::new(SqlDataErrorKind::InvalidArgument(
                "SQL text is empty".to_string(),
            )));
        }
        let body = ExecuteRequest {
            command_type: CommandType::infer(sql),
            sql: sql.trim().to_string(),
            params: coerce_record(params),
            param_directions: param_directions.filter(|d| !d.is_empty()),
        };
        let result: SqlResult = self
            .post("execute", None, &body, self.cancellation.as_ref())
            .await?
            .into_data()?;
        debug!(result_type = ?result.result_type, "SQL executed");
        Ok(result)
    }

    /// Serializes `body`, targets `{operation}/{table}` and sends it.
    pub(crate) async fn post<B: Serialize + ?Sized>(
        &self,
        operation: &str,
        table: Option<&str>,
        body: &B,
        cancellation: Option<&CancellationToken>,
    ) -> SqlDataResult<ResponseEnvelope> {
        let request = ApiRequest {
            url: self.config.endpoint(operation, table)?,
            body: serde_json::to_value(body)?,
            bearer_token: self.config.authorization().map(str::to_string),
        };
        Ok(envelope::send(self.transport.as_ref(), &request, cancellation).await)
    }
}

/// Path segment for `table`: the parsed name with any alias dropped.
pub(crate) fn table_segment(table: &str) -> SqlDataResult<String> {
    let (name, _) = TableName::parse(table).into_parts();
    if name.is_empty() {
        return Err(SqlDataError::new(SqlDataErrorKind::InvalidArgument(
            "table name is empty".to_string(),
        )));
    }
    Ok(name)
}

// The server answers with either `{table}` or an items list.
fn into_data_table(data: Value) -> SqlDataResult<DataTable> {
    match data {
        Value::Null => return Ok(DataTable::default()),
        Value::Array(items) => {
            let items: Vec<PrimitiveRecord> = serde_json::from_value(Value::Array(items))?;
            return Ok(records_table(items));
        }
        _ => {}
    }
    let response: QueryResponse = serde_json::from_value(data)?;
    match (response.table, response.items) {
        (Some(table), _) => Ok(table),
        (None, Some(items)) => Ok(records_table(items)),
        (None, None) => Ok(DataTable::default()),
    }
}

fn records_table(items: Vec<PrimitiveRecord>) -> DataTable {
    let records: Vec<Record> = items
        .into_iter()
        .map(|item| item.into_iter().map(|(k, v)| (k, v.into())).collect())
        .collect();
    DataTable::from_records(&records)
}
