#![forbid(unsafe_code)]

use super::super::*;
use super::{item_updated_at_tx, touch_item_tx};
use bk_core::{ItemId, normalize_tag_names};
use rusqlite::params;
use tracing::info;

impl SqliteStore {
    /// Adds every named tag to every listed item in one scope and returns how
    /// many items gained a tag. Existing associations are kept. An unknown item
    /// aborts the whole batch.
    pub fn items_bulk_tag(
        &mut self,
        ids: &[ItemId],
        tag_names: &[String],
    ) -> Result<usize, StoreError> {
        let names = normalize_tag_names(tag_names)?;
        if ids.is_empty() || names.is_empty() {
            return Ok(0);
        }

        let now_ms = now_ms();
        let changed = self.atomic(|tx| {
            let reconciler = AssociationReconciler::new(tx);
            let mut tags = Vec::with_capacity(names.len());
            for name in &names {
                tags.push(reconciler.registry().resolve(name)?);
            }

            let mut changed = 0;
            for id in ids {
                let updated_at_ms = item_updated_at_tx(tx, id)?;
                let mut desired = reconciler.existing(id)?;
                for tag in &tags {
                    if !desired.contains(tag) {
                        desired.push(*tag);
                    }
                }
                if reconciler.reconcile_ids(id, &desired)?.changed() {
                    touch_item_tx(tx, id, updated_at_ms, now_ms)?;
                    changed += 1;
                }
            }
            Ok(changed)
        })?;

        info!(items = ids.len(), tags = names.len(), changed, "bulk tag applied");
        Ok(changed)
    }

    /// Sets the read flag on every listed item in one scope and returns how many
    /// items changed. Items already in that state keep their `updated_at`.
    pub fn items_mark_read(&mut self, ids: &[ItemId], read: bool) -> Result<usize, StoreError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let now_ms = now_ms();
        let changed = self.atomic(|tx| {
            let mut changed = 0;
            for id in ids {
                let updated_at_ms = item_updated_at_tx(tx, id)?;
                let flipped = tx.execute(
                    "UPDATE items SET read=?2 WHERE id=?1 AND read<>?2",
                    params![id.as_str(), read],
                )?;
                if flipped > 0 {
                    touch_item_tx(tx, id, updated_at_ms, now_ms)?;
                    changed += 1;
                }
            }
            Ok(changed)
        })?;

        info!(items = ids.len(), read, changed, "read flag applied");
        Ok(changed)
    }
}
