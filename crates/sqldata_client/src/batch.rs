//! Adaptive batch persistence.
//!
//! Rows are sent in sequential chunks bounded by both a row count and the
//! serialized size of the accumulated rows. A narrow table with millions of
//! rows trips the count limit; a wide table with large rows trips the size
//! limit first.

use crate::{SqlDataApi, client::table_segment};
use serde_json::Value;
use sqldata_core::{
    DataTable, MAX_BATCH_BYTES, Record, SaveOptions, SaveRequest, SaveStatus, coerce_records,
};
use sqldata_error::SqlDataResult;
use tracing::{debug, info, instrument, warn};

/// Saves `items` and deletes `items_to_delete` in `table`.
///
/// With no items and no deletes nothing is sent. With only deletes a single
/// request is sent and its status returned as is. Otherwise rows go out in
/// batches and the per-batch statuses are summed.
///
/// The delete list travels with the first batch only. An alias on `table`
/// is dropped from the endpoint path.
///
/// Cancellation is checked before every batch; already-sent batches stay
/// counted in the returned status. A failing batch aborts the call.
#[instrument(
    skip(api, items, items_to_delete, options),
    fields(items = items.len(), deletes = items_to_delete.len(), method = %options.method())
)]
pub(crate) async fn persist(
    api: &SqlDataApi,
    table: &str,
    items: &[Record],
    items_to_delete: &[Record],
    options: &SaveOptions,
) -> SqlDataResult<SaveStatus> {
    let table = table_segment(table)?;
    let table = table.as_str();
    api.config().validate()?;

    let operation = options.method().operation();
    let cancellation = options
        .cancellation()
        .clone()
        .or_else(|| api.cancellation().cloned());
    let primary_keys = options.primary_keys().clone().filter(|keys| !keys.is_empty());
    let mut pending_deletes = Some(coerce_records(items_to_delete)).filter(|d| !d.is_empty());

    if items.is_empty() {
        let Some(deletes) = pending_deletes else {
            debug!("Nothing to save or delete");
            return Ok(SaveStatus::default());
        };
        debug!(deletes = deletes.len(), "Sending delete-only request");
        let body = SaveRequest {
            table_data: None,
            items_to_delete: Some(deletes),
            primary_keys,
        };
        return api
            .post(operation, Some(table), &body, cancellation.as_ref())
            .await?
            .into_data();
    }

    let DataTable { field_names, rows } = DataTable::from_records(items);
    let total_rows = rows.len();
    let batch_size = (*options.batch_size()).max(1);

    let mut totals = SaveStatus::default();
    let mut pending: Vec<Vec<Value>> = Vec::new();
    let mut pending_bytes = 0usize;
    let mut processed = 0usize;
    let mut batches = 0usize;

    for (index, row) in rows.into_iter().enumerate() {
        pending_bytes += serde_json::to_string(&row)?.len();
        pending.push(row);

        let is_last = index + 1 == total_rows;
        if !is_last && pending.len() < batch_size && pending_bytes <= MAX_BATCH_BYTES {
            continue;
        }

        if cancellation.as_ref().is_some_and(|token| token.is_cancelled()) {
            warn!(processed, total_rows, "Save cancelled");
            break;
        }

        let batch = std::mem::take(&mut pending);
        let batch_len = batch.len();
        debug!(batch = batches, rows = batch_len, bytes = pending_bytes, "Flushing batch");
        pending_bytes = 0;

        let body = SaveRequest {
            table_data: Some(DataTable {
                field_names: field_names.clone(),
                rows: batch,
            }),
            items_to_delete: pending_deletes.take(),
            primary_keys: primary_keys.clone(),
        };
        let status: SaveStatus = api
            .post(operation, Some(table), &body, cancellation.as_ref())
            .await?
            .into_data()?;

        totals += status;
        processed += batch_len;
        batches += 1;

        if let Some(progress) = options.batch_progress() {
            progress.report(processed, &status);
        }
    }

    info!(
        batches,
        processed,
        inserted = totals.inserted,
        updated = totals.updated,
        deleted = totals.deleted,
        "Save complete"
    );
    Ok(totals)
}
