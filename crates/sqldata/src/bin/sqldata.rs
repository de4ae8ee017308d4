//! Command line access to a SQL data API connection.
//!
//! Configuration comes from `SQL_DATA_API_*` environment variables (a `.env`
//! file is honored) or from `--config <file.toml>`.

use anyhow::Result;
use clap::{Parser, Subcommand};
use sqldata::{ClientConfig, FieldsOrSpec, QuerySpec, Record, SqlDataApi};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "sqldata", version, about = "Query a SQL data API connection")]
struct Cli {
    /// TOML configuration file; environment variables are used when absent
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Read rows from a table or view
    Query {
        /// Table or view, optionally followed by an alias
        table: String,
        /// Comma-separated fields
        #[arg(long)]
        fields: Option<String>,
        /// Filter expression
        #[arg(long)]
        filter: Option<String>,
        /// ORDER BY expression
        #[arg(long)]
        order_by: Option<String>,
        /// Rows to skip
        #[arg(long)]
        skip: Option<u64>,
        /// Maximum rows
        #[arg(long)]
        top: Option<u64>,
    },
    /// Run a SQL statement or stored procedure
    Execute {
        /// SQL text or procedure name
        sql: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    sqldata::init_tracing().map_err(anyhow::Error::msg)?;

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ClientConfig::from_file(path)?,
        None => ClientConfig::from_env()?,
    };
    let api = SqlDataApi::new(config)?;

    match cli.command {
        Command::Query {
            table,
            fields,
            filter,
            order_by,
            skip,
            top,
        } => {
            let mut spec = QuerySpec::builder();
            if let Some(filter) = filter {
                spec.filter(filter);
            }
            if let Some(order_by) = order_by {
                spec.order_by(order_by);
            }
            if let Some(skip) = skip {
                spec.skip(skip);
            }
            if let Some(top) = top {
                spec.top(top);
            }
            let spec = spec.build()?;
            let rows = api
                .query(&table, fields.map(FieldsOrSpec::from), Some(spec))
                .await?;
            tracing::info!(rows = rows.len(), "Query complete");
            println!("{}", serde_json::to_string_pretty(&to_json(&rows))?);
        }
        Command::Execute { sql } => {
            let result = api.execute(&sql, &Record::new(), None).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}

fn to_json(rows: &[Record]) -> Vec<serde_json::Value> {
    rows.iter()
        .map(|row| serde_json::Value::Object(sqldata::coerce_record(row)))
        .collect()
}
