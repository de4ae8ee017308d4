//! Query and persist tabular data through a remote SQL data API.
//!
//! ```no_run
//! use sqldata::{ClientConfig, SqlDataApi};
//!
//! # async fn run() -> sqldata::SqlDataResult<()> {
//! let api = SqlDataApi::new(ClientConfig::from_env()?)?;
//! let customers = api.table("Customers").select("Id, Name").top(10).to_list().await?;
//! # Ok(())
//! # }
//! ```

pub use sqldata_client::*;
pub use sqldata_core::*;
pub use sqldata_error::*;
