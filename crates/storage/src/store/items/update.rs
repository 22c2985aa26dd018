#![forbid(unsafe_code)]

use super::super::*;
use super::{item_updated_at_tx, stored_text, touch_item_tx};
use bk_core::{ItemId, validate_title, validate_url};
use rusqlite::params;
use tracing::debug;

impl SqliteStore {
    /// Applies the supplied fields and reconciles the tag set in one scope.
    ///
    /// `updated_at` moves when any field is supplied or the association set
    /// actually changes; a request that changes nothing commits as a no-op.
    pub fn item_update(&mut self, id: &ItemId, request: ItemUpdateRequest) -> Result<(), StoreError> {
        let has_field_changes = request.has_field_changes();
        let ItemUpdateRequest {
            title,
            url,
            kind,
            starred,
            read,
            notes,
            favicon_url,
            tag_names,
        } = request;

        if let Some(title) = title.as_deref() {
            validate_title(title)?;
        }
        if let Some(url) = url.as_deref() {
            validate_url(url)?;
        }

        let now_ms = now_ms();
        self.atomic(|tx| {
            let updated_at_ms = item_updated_at_tx(tx, id)?;

            if has_field_changes {
                // NULL parameters keep the stored value; notes and favicon use
                // a flag so that an explicit blank clears them.
                tx.execute(
                    r#"
                    UPDATE items SET
                      title = COALESCE(?2, title),
                      url = COALESCE(?3, url),
                      type = COALESCE(?4, type),
                      starred = COALESCE(?5, starred),
                      read = COALESCE(?6, read),
                      notes = CASE WHEN ?7 THEN ?8 ELSE notes END,
                      favicon_url = CASE WHEN ?9 THEN ?10 ELSE favicon_url END
                    WHERE id = ?1
                    "#,
                    params![
                        id.as_str(),
                        title,
                        url,
                        kind.map(|kind| kind.as_str()),
                        starred,
                        read,
                        notes.is_some(),
                        stored_text(notes.as_deref()),
                        favicon_url.is_some(),
                        stored_text(favicon_url.as_deref()),
                    ],
                )?;
            }

            let outcome = AssociationReconciler::new(tx).reconcile_names(id, &tag_names)?;

            if has_field_changes || outcome.changed() {
                touch_item_tx(tx, id, updated_at_ms, now_ms)?;
            } else {
                debug!(item = %id, "update changed nothing");
            }
            Ok(())
        })
    }
}
