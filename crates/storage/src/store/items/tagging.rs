#![forbid(unsafe_code)]

use super::super::*;
use super::{item_updated_at_tx, touch_item_tx};
use bk_core::{ItemId, TagId, validate_tag_name};

impl SqliteStore {
    /// Adds one tag to an item, creating the tag on first use. Adding a tag the
    /// item already carries is a no-op.
    pub fn item_tag(&mut self, id: &ItemId, name: &str) -> Result<TagId, StoreError> {
        validate_tag_name(name)?;

        let now_ms = now_ms();
        self.atomic(|tx| {
            let updated_at_ms = item_updated_at_tx(tx, id)?;
            let reconciler = AssociationReconciler::new(tx);
            let tag = reconciler.registry().resolve(name)?;

            let mut desired = reconciler.existing(id)?;
            if !desired.contains(&tag) {
                desired.push(tag);
            }

            if reconciler.reconcile_ids(id, &desired)?.changed() {
                touch_item_tx(tx, id, updated_at_ms, now_ms)?;
            }
            Ok(tag)
        })
    }

    /// Removes one tag from an item and deletes the tag if nothing else uses
    /// it. Removing a tag the item does not carry is a no-op.
    pub fn item_untag(&mut self, id: &ItemId, tag: TagId) -> Result<(), StoreError> {
        let now_ms = now_ms();
        self.atomic(|tx| {
            let updated_at_ms = item_updated_at_tx(tx, id)?;
            let reconciler = AssociationReconciler::new(tx);
            if !reconciler.registry().exists(tag)? {
                return Err(StoreError::UnknownTag);
            }

            let desired: Vec<TagId> = reconciler
                .existing(id)?
                .into_iter()
                .filter(|existing| *existing != tag)
                .collect();

            if reconciler.reconcile_ids(id, &desired)?.changed() {
                touch_item_tx(tx, id, updated_at_ms, now_ms)?;
            }
            Ok(())
        })
    }
}
