#![forbid(unsafe_code)]

use super::super::*;
use super::create::create_item_tx;
use rusqlite::{OptionalExtension, params};
use tracing::info;

impl SqliteStore {
    /// Creates every requested item whose url is not already catalogued, all in
    /// one scope. One invalid entry aborts the whole import.
    pub fn items_import(
        &mut self,
        requests: Vec<ItemCreateRequest>,
    ) -> Result<ImportReport, StoreError> {
        let now_ms = now_ms();
        let report = self.atomic(|tx| {
            let mut report = ImportReport::default();
            for request in &requests {
                if url_exists_tx(tx, &request.url)? {
                    report.skipped += 1;
                    continue;
                }
                let id = create_item_tx(tx, request, now_ms)?;
                report.created.push(id);
            }
            Ok(report)
        })?;

        info!(
            created = report.created.len(),
            skipped = report.skipped,
            "bookmarks imported"
        );
        Ok(report)
    }
}

fn url_exists_tx(tx: &Transaction<'_>, url: &str) -> Result<bool, StoreError> {
    Ok(tx
        .query_row(
            "SELECT 1 FROM items WHERE url=?1 LIMIT 1",
            params![url],
            |row| row.get::<_, i64>(0),
        )
        .optional()?
        .is_some())
}
