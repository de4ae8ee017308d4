//! Error types for the sqldata client.
//!
//! Every public operation in the workspace returns [`SqlDataResult`]. Local
//! validation problems fail before any request is sent; remote and transport
//! failures are normalized once and surface here with the extracted message.

/// Specific error conditions raised by sqldata operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SqlDataErrorKind {
    /// A caller-supplied argument was empty or malformed.
    #[display("Invalid argument: {_0}")]
    InvalidArgument(String),

    /// Base URL or connection name is not configured.
    #[display("Missing configuration: {_0}")]
    MissingConfiguration(String),

    /// The server answered with a non-success status.
    #[display("Remote error (status {status}): {message}")]
    Remote {
        /// HTTP status code
        status: u16,
        /// Message extracted from the response
        message: String,
    },

    /// The request never produced a response.
    #[display("Transport error: {_0}")]
    Transport(String),

    /// A request or response body could not be (de)serialized.
    #[display("Serialization error: {_0}")]
    Serialization(String),

    /// Configuration source could not be read or parsed.
    #[display("Configuration error: {_0}")]
    Config(String),
}

impl SqlDataErrorKind {
    /// The human-readable message carried by remote and transport failures.
    pub fn message(&self) -> Option<&str> {
        match self {
            SqlDataErrorKind::Remote { message, .. } => Some(message),
            SqlDataErrorKind::Transport(message) => Some(message),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SqlDataErrorKind {
    fn from(err: serde_json::Error) -> Self {
        SqlDataErrorKind::Serialization(err.to_string())
    }
}

/// sqldata error with location tracking.
///
/// # Examples
///
/// ```
/// use sqldata_error::{SqlDataError, SqlDataErrorKind};
///
/// let err = SqlDataError::new(SqlDataErrorKind::InvalidArgument("table name is empty".into()));
/// assert!(format!("{}", err).contains("table name is empty"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("SqlData Error: {} at line {} in {}", kind, line, file)]
pub struct SqlDataError {
    kind: SqlDataErrorKind,
    line: u32,
    file: &'static str,
}

impl SqlDataError {
    /// Create a new error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SqlDataErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &SqlDataErrorKind {
        &self.kind
    }

    /// Line number where the error was created.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// File where the error was created.
    pub fn file(&self) -> &'static str {
        self.file
    }
}

impl<T> From<T> for SqlDataError
where
    T: Into<SqlDataErrorKind>,
{
    #[track_caller]
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for sqldata operations.
pub type SqlDataResult<T> = std::result::Result<T, SqlDataError>;
