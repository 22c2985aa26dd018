#![forbid(unsafe_code)]

mod bulk;
mod create;
mod import;
mod read;
mod tagging;
mod update;

use super::StoreError;
use super::support::next_updated_at_ms;
use bk_core::ItemId;
use rusqlite::{OptionalExtension, Transaction, params};

fn item_updated_at_tx(tx: &Transaction<'_>, id: &ItemId) -> Result<i64, StoreError> {
    tx.query_row(
        "SELECT updated_at_ms FROM items WHERE id=?1",
        params![id.as_str()],
        |row| row.get::<_, i64>(0),
    )
    .optional()?
    .ok_or(StoreError::UnknownId)
}

fn touch_item_tx(
    tx: &Transaction<'_>,
    id: &ItemId,
    previous_ms: i64,
    now_ms: i64,
) -> Result<(), StoreError> {
    tx.execute(
        "UPDATE items SET updated_at_ms=?2 WHERE id=?1",
        params![id.as_str(), next_updated_at_ms(previous_ms, now_ms)],
    )?;
    Ok(())
}

/// Optional text columns store NULL rather than blank strings.
fn stored_text(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}
