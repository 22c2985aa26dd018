#![forbid(unsafe_code)]

use super::StoreError;
use super::registry::TagRegistry;
use bk_core::{ItemId, TagId, normalize_tag_names};
use rusqlite::{Transaction, params};
use std::collections::BTreeSet;
use tracing::debug;

/// Delta applied by one reconciliation, in application order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub added: Vec<TagId>,
    pub removed: Vec<TagId>,
    pub orphans_deleted: Vec<TagId>,
}

impl ReconcileOutcome {
    pub fn changed(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty()
    }
}

/// Turns an item's current association set into a desired one with the
/// minimal inserts and deletes. All reads and writes go through the
/// transaction it was built from, so the caller's scope decides atomicity.
pub struct AssociationReconciler<'a> {
    tx: &'a Transaction<'a>,
    registry: TagRegistry<'a>,
}

impl<'a> AssociationReconciler<'a> {
    pub fn new(tx: &'a Transaction<'a>) -> Self {
        Self {
            tx,
            registry: TagRegistry::new(tx),
        }
    }

    pub fn registry(&self) -> &TagRegistry<'a> {
        &self.registry
    }

    /// Tag ids currently associated with `item`, oldest association first.
    pub fn existing(&self, item: &ItemId) -> Result<Vec<TagId>, StoreError> {
        let mut stmt = self
            .tx
            .prepare("SELECT tag_id FROM items_tags WHERE item_id=?1 ORDER BY rowid ASC")?;
        let rows = stmt.query_map(params![item.as_str()], |row| row.get::<_, i64>(0))?;
        Ok(rows
            .map(|row| row.map(TagId::new))
            .collect::<Result<Vec<_>, _>>()?)
    }

    /// Resolves `names` (creating tags as needed) and reconciles against them.
    /// Duplicate names resolve once.
    pub fn reconcile_names(
        &self,
        item: &ItemId,
        names: &[String],
    ) -> Result<ReconcileOutcome, StoreError> {
        let names = normalize_tag_names(names)?;
        let mut desired = Vec::with_capacity(names.len());
        for name in &names {
            desired.push(self.registry.resolve(name)?);
        }
        self.reconcile_ids(item, &desired)
    }

    /// Removes associations not in `desired` (deleting tags left orphaned),
    /// then adds the missing ones in `desired` order.
    pub fn reconcile_ids(
        &self,
        item: &ItemId,
        desired: &[TagId],
    ) -> Result<ReconcileOutcome, StoreError> {
        let existing = self.existing(item)?;
        let existing_set: BTreeSet<TagId> = existing.iter().copied().collect();
        let desired_set: BTreeSet<TagId> = desired.iter().copied().collect();

        let to_remove: Vec<TagId> = existing
            .iter()
            .copied()
            .filter(|id| !desired_set.contains(id))
            .collect();
        let mut queued = BTreeSet::new();
        let to_add: Vec<TagId> = desired
            .iter()
            .copied()
            .filter(|id| !existing_set.contains(id) && queued.insert(*id))
            .collect();

        let mut outcome = ReconcileOutcome::default();

        for tag in to_remove {
            self.tx.execute(
                "DELETE FROM items_tags WHERE item_id=?1 AND tag_id=?2",
                params![item.as_str(), tag.get()],
            )?;
            outcome.removed.push(tag);
            if self.registry.delete_if_orphan(tag)? {
                outcome.orphans_deleted.push(tag);
            }
        }

        for tag in to_add {
            self.tx.execute(
                "INSERT INTO items_tags(item_id, tag_id) VALUES (?1, ?2)",
                params![item.as_str(), tag.get()],
            )?;
            outcome.added.push(tag);
        }

        if outcome.changed() {
            debug!(
                item = %item,
                added = ?outcome.added,
                removed = ?outcome.removed,
                orphans_deleted = ?outcome.orphans_deleted,
                "associations reconciled"
            );
        }

        Ok(outcome)
    }
}
