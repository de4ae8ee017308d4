//! Core data types for the sqldata SQL-proxy client.
//!
//! This crate holds the wire types and the pure pieces of request shaping:
//! scalar coercion, table alias parsing, columnar tables and the query, save
//! and execute payloads.

mod mutation;
mod name;
mod query;
mod save;
mod scalar;
mod sql;
mod table;

pub use mutation::{FilterRequest, UpdateRequest};
pub use name::TableName;
pub use query::{
    JoinEntry, JoinType, QueryRequest, QuerySpec, QuerySpecBuilder, TableJoin, non_empty,
};
pub use save::{
    BatchProgress, DEFAULT_BATCH_SIZE, MAX_BATCH_BYTES, SaveMethod, SaveOptions, SaveRequest,
    SaveStatus,
};
pub use scalar::{
    PrimitiveRecord, Record, Scalar, coerce, coerce_record, coerce_records, format_date,
    format_datetime,
};
pub use sql::{CommandType, ExecuteRequest, ParamDirection, SqlResult};
pub use table::DataTable;
pub use tokio_util::sync::CancellationToken;
