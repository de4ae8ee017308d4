//! Client for a remote SQL data API.
//!
//! This crate shapes requests and drives them over a [`Transport`]:
//!
//! - [`translate_query`] and the fluent [`TableQuery`] build read requests
//! - the batch engine behind [`SqlDataApi::save`] chunks large writes
//! - [`envelope`] normalizes every response into one success/failure shape

mod batch;
mod builder;
mod client;
mod config;
pub mod envelope;
mod observability;
mod transport;
mod translator;

pub use builder::TableQuery;
pub use client::SqlDataApi;
pub use config::{
    ACCESS_TOKEN_PARAM, AUTHENTICATE_PATH, ClientConfig, ClientConfigBuilder, DATA_API_PREFIX,
};
pub use envelope::{FALLBACK_ERROR_MESSAGE, ResponseEnvelope};
pub use observability::init_tracing;
pub use translator::{ALL_FIELDS, FieldsOrSpec, translate_query};
pub use transport::{ApiRequest, HttpTransport, Transport, TransportResponse};
