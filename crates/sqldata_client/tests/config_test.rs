//! Tests for client configuration loading and endpoint construction.

mod test_utils;

use sqldata_client::ClientConfig;
use sqldata_error::SqlDataErrorKind;
use std::io::Write;
use test_utils::query_pairs;

#[test]
fn test_from_file_reads_toml() {
    let mut file = tempfile::NamedTempFile::new().expect("Temp file");
    writeln!(
        file,
        r#"
base_url = "https://data.example.com"
connection_name = "reporting"
access_token = "k-123"
timeout_secs = 15
"#
    )
    .expect("Write config");

    let config = ClientConfig::from_file(file.path()).expect("Config loads");

    assert_eq!(config.connection_name(), "reporting");
    assert_eq!(*config.timeout_secs(), Some(15));
    assert_eq!(config.bearer_token(), &None);
    let url = config.endpoint("execute", None).expect("Configured");
    assert!(url.starts_with("https://data.example.com/sql-data-api/reporting/execute?"));
    assert_eq!(
        query_pairs(&url),
        vec![("$accessToken".to_string(), "k-123".to_string())]
    );
}

#[test]
fn test_from_file_reports_parse_errors_as_config() {
    let mut file = tempfile::NamedTempFile::new().expect("Temp file");
    writeln!(file, "base_url = [").expect("Write config");

    let err = ClientConfig::from_file(file.path()).expect_err("Invalid TOML");

    assert!(matches!(err.kind(), SqlDataErrorKind::Config(_)));
}

#[test]
fn test_missing_file_is_config_error() {
    let err = ClientConfig::from_file("/nonexistent/sqldata.toml").expect_err("No file");
    assert!(matches!(err.kind(), SqlDataErrorKind::Config(_)));
}

#[test]
fn test_validate_requires_base_url_and_connection() {
    let no_base = ClientConfig::builder()
        .connection_name("main")
        .build()
        .expect("Builds");
    assert!(matches!(
        no_base.validate().expect_err("No base URL").kind(),
        SqlDataErrorKind::MissingConfiguration(_)
    ));

    let no_connection = ClientConfig::builder()
        .base_url("https://data.example.com")
        .build()
        .expect("Builds");
    assert!(matches!(
        no_connection
            .endpoint("query", Some("Customers"))
            .expect_err("No connection")
            .kind(),
        SqlDataErrorKind::MissingConfiguration(_)
    ));
}

#[test]
fn test_authenticate_url_needs_only_base() {
    let config = ClientConfig::builder()
        .base_url("https://data.example.com///")
        .build()
        .expect("Builds");

    assert_eq!(
        config.authenticate_url().expect("Base configured"),
        "https://data.example.com/api/security/authenticate"
    );
}

#[test]
fn test_empty_bearer_token_falls_back_to_access_token() {
    let config = ClientConfig::builder()
        .base_url("https://data.example.com")
        .connection_name("main")
        .bearer_token("")
        .access_token("k")
        .build()
        .expect("Builds");

    assert_eq!(config.authorization(), None);
    let url = config.endpoint("query", Some("T")).expect("Configured");
    assert!(url.contains("/query/T?"));
    assert_eq!(query_pairs(&url), vec![("$accessToken".to_string(), "k".to_string())]);
}

#[test]
fn test_access_token_with_reserved_characters_survives() {
    let token = "a&b=c+d/e#f";
    let config = ClientConfig::builder()
        .base_url("https://data.example.com")
        .connection_name("main")
        .access_token(token)
        .build()
        .expect("Builds");

    let url = config.endpoint("query", Some("T")).expect("Configured");

    assert!(!url.contains('#'));
    assert_eq!(query_pairs(&url), vec![("$accessToken".to_string(), token.to_string())]);
}

#[test]
fn test_invalid_base_url_is_config_error() {
    let config = ClientConfig::builder()
        .base_url("not a url")
        .connection_name("main")
        .build()
        .expect("Builds");

    let err = config.endpoint("query", None).expect_err("Unparseable base URL");

    assert!(matches!(err.kind(), SqlDataErrorKind::Config(_)));
}
