//! Save options, per-batch status and the save request body.

use crate::{DataTable, PrimitiveRecord};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Default maximum rows per save request.
pub const DEFAULT_BATCH_SIZE: usize = 10_000;

/// Serialized row bytes after which a batch is flushed early.
pub const MAX_BATCH_BYTES: usize = 1_500_000;

/// Server-side save semantics. Each maps to its own endpoint.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
)]
pub enum SaveMethod {
    /// Insert new rows, update existing ones by primary key
    #[default]
    Merge,
    /// Insert only
    Append,
    /// Server bulk-copy insert
    BulkInsert,
}

impl SaveMethod {
    /// Endpoint operation segment for this method.
    pub fn operation(&self) -> &'static str {
        match self {
            SaveMethod::Merge => "save",
            SaveMethod::Append => "append-data",
            SaveMethod::BulkInsert => "bulk-insert",
        }
    }
}

/// Row counts reported by the server for one save request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveStatus {
    /// Rows inserted
    pub inserted: u64,
    /// Rows updated
    pub updated: u64,
    /// Rows deleted
    pub deleted: u64,
}

impl std::ops::AddAssign for SaveStatus {
    fn add_assign(&mut self, rhs: Self) {
        self.inserted = self.inserted.saturating_add(rhs.inserted);
        self.updated = self.updated.saturating_add(rhs.updated);
        self.deleted = self.deleted.saturating_add(rhs.deleted);
    }
}

impl std::ops::Add for SaveStatus {
    type Output = SaveStatus;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

/// Callback invoked after every flushed batch with the rows processed so far
/// and that batch's status.
#[derive(Clone)]
pub struct BatchProgress(Arc<dyn Fn(usize, &SaveStatus) + Send + Sync>);

impl BatchProgress {
    /// Wraps a progress callback.
    pub fn new(callback: impl Fn(usize, &SaveStatus) + Send + Sync + 'static) -> Self {
        Self(Arc::new(callback))
    }

    /// Invokes the callback.
    pub fn report(&self, processed: usize, status: &SaveStatus) {
        (self.0)(processed, status)
    }
}

impl std::fmt::Debug for BatchProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BatchProgress(..)")
    }
}

/// Options for a save call.
#[derive(Debug, Clone, derive_getters::Getters, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct SaveOptions {
    /// Save semantics
    method: SaveMethod,
    /// Maximum rows per request
    batch_size: usize,
    /// Primary key columns, when the server cannot infer them
    #[setters(strip_option)]
    primary_keys: Option<Vec<String>>,
    /// Progress callback
    #[setters(strip_option)]
    batch_progress: Option<BatchProgress>,
    /// Per-call cancellation, overriding the client's token
    #[setters(strip_option)]
    cancellation: Option<CancellationToken>,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            method: SaveMethod::default(),
            batch_size: DEFAULT_BATCH_SIZE,
            primary_keys: None,
            batch_progress: None,
            cancellation: None,
        }
    }
}

impl SaveOptions {
    /// Sets the progress callback from a closure.
    pub fn on_batch(self, callback: impl Fn(usize, &SaveStatus) + Send + Sync + 'static) -> Self {
        self.with_batch_progress(BatchProgress::new(callback))
    }
}

/// Body of a save, append or bulk-insert request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    /// Rows to write
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_data: Option<DataTable>,
    /// Rows to delete, as coerced key records
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items_to_delete: Option<Vec<PrimitiveRecord>>,
    /// Primary key columns
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_keys: Option<Vec<String>>,
}
