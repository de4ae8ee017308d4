//! Connection configuration for the SQL data API.

use derive_getters::Getters;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use sqldata_error::{SqlDataError, SqlDataErrorKind, SqlDataResult};
use std::path::Path;
use tracing::{debug, instrument};

/// Path prefix of all data endpoints.
pub const DATA_API_PREFIX: &str = "sql-data-api";

/// Path of the authentication endpoint.
pub const AUTHENTICATE_PATH: &str = "api/security/authenticate";

/// Query parameter carrying the access token.
pub const ACCESS_TOKEN_PARAM: &str = "$accessToken";

/// Connection settings owned by one client instance.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Getters,
    derive_builder::Builder,
)]
#[builder(setter(into), default)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the service (e.g., "https://api.example.com")
    base_url: String,
    /// Server-side connection name
    connection_name: String,
    /// Sent as `Authorization: Bearer <token>`
    #[builder(setter(into, strip_option))]
    bearer_token: Option<String>,
    /// Sent as `?$accessToken=<token>` when no bearer token is set
    #[builder(setter(into, strip_option))]
    access_token: Option<String>,
    /// Per-request timeout applied by the HTTP transport
    #[builder(setter(into, strip_option))]
    timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Creates a new builder for ClientConfig.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Create config from environment variables
    ///
    /// Reads:
    /// - `SQL_DATA_API_BASE_URL` (required)
    /// - `SQL_DATA_API_CONNECTION` (required)
    /// - `SQL_DATA_API_BEARER_TOKEN` (optional)
    /// - `SQL_DATA_API_ACCESS_TOKEN` (optional)
    /// - `SQL_DATA_API_TIMEOUT_SECS` (optional)
    pub fn from_env() -> SqlDataResult<Self> {
        let required = |name: &str| {
            std::env::var(name).map_err(|_| {
                SqlDataError::new(SqlDataErrorKind::MissingConfiguration(format!(
                    "{} not set",
                    name
                )))
            })
        };

        let timeout_secs = match std::env::var("SQL_DATA_API_TIMEOUT_SECS") {
            Ok(raw) => Some(raw.parse::<u64>().map_err(|e| {
                SqlDataError::new(SqlDataErrorKind::Config(format!(
                    "SQL_DATA_API_TIMEOUT_SECS is not a number: {}",
                    e
                )))
            })?),
            Err(_) => None,
        };

        let config = Self {
            base_url: required("SQL_DATA_API_BASE_URL")?,
            connection_name: required("SQL_DATA_API_CONNECTION")?,
            bearer_token: std::env::var("SQL_DATA_API_BEARER_TOKEN").ok(),
            access_token: std::env::var("SQL_DATA_API_ACCESS_TOKEN").ok(),
            timeout_secs,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    #[instrument(skip(path))]
    pub fn from_file(path: impl AsRef<Path>) -> SqlDataResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            SqlDataError::new(SqlDataErrorKind::Config(format!(
                "Failed to read config file: {}",
                e
            )))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            SqlDataError::new(SqlDataErrorKind::Config(format!(
                "Failed to parse config: {}",
                e
            )))
        })?;
        debug!(base_url = %config.base_url, connection = %config.connection_name, "Loaded config");
        Ok(config)
    }

    /// Returns a copy with the bearer token replaced.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Fails with `MissingConfiguration` unless base URL and connection name are set.
    pub fn validate(&self) -> SqlDataResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(SqlDataError::new(SqlDataErrorKind::MissingConfiguration(
                "base URL is not configured".to_string(),
            )));
        }
        if self.connection_name.trim().is_empty() {
            return Err(SqlDataError::new(SqlDataErrorKind::MissingConfiguration(
                "connection name is not configured".to_string(),
            )));
        }
        Ok(())
    }

    /// URL of a data endpoint: `{base}/sql-data-api/{connection}/{operation}[/{table}]`.
    ///
    /// Path segments and the access token are percent-encoded.
    pub fn endpoint(&self, operation: &str, table: Option<&str>) -> SqlDataResult<String> {
        self.validate()?;
        let mut url = format!(
            "{}/{}/{}/{}",
            self.base(),
            DATA_API_PREFIX,
            self.connection_name.trim(),
            operation
        );
        if let Some(table) = table {
            url.push('/');
            url.push_str(table.trim());
        }
        let mut url = Url::parse(&url).map_err(|e| {
            SqlDataError::new(SqlDataErrorKind::Config(format!(
                "Invalid base URL {}: {}",
                self.base_url, e
            )))
        })?;
        if let Some(token) = self.query_access_token() {
            url.query_pairs_mut().append_pair(ACCESS_TOKEN_PARAM, token);
        }
        Ok(url.into())
    }

    /// URL of the authentication endpoint.
    pub fn authenticate_url(&self) -> SqlDataResult<String> {
        if self.base_url.trim().is_empty() {
            return Err(SqlDataError::new(SqlDataErrorKind::MissingConfiguration(
                "base URL is not configured".to_string(),
            )));
        }
        Ok(format!("{}/{}", self.base(), AUTHENTICATE_PATH))
    }

    /// Bearer token to attach, if any.
    pub fn authorization(&self) -> Option<&str> {
        self.bearer_token.as_deref().filter(|t| !t.is_empty())
    }

    fn base(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }

    // Bearer wins; the access token only goes on the query string without one.
    fn query_access_token(&self) -> Option<&str> {
        match self.authorization() {
            Some(_) => None,
            None => self.access_token.as_deref().filter(|t| !t.is_empty()),
        }
    }
}
