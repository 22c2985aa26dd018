#![forbid(unsafe_code)]

use super::StoreError;
use super::support::map_tag_insert_error;
use bk_core::{Tag, TagId, validate_tag_name};
use rusqlite::{OptionalExtension, Transaction, params};
use tracing::debug;

/// Get-or-create access to the `tags` table, bound to one open transaction.
pub struct TagRegistry<'a> {
    tx: &'a Transaction<'a>,
}

impl<'a> TagRegistry<'a> {
    pub fn new(tx: &'a Transaction<'a>) -> Self {
        Self { tx }
    }

    /// Returns the id of the tag named exactly `name`, creating it on first use.
    pub fn resolve(&self, name: &str) -> Result<TagId, StoreError> {
        validate_tag_name(name)?;
        if let Some(id) = self.find(name)? {
            return Ok(id);
        }
        self.insert(name)
    }

    pub fn find(&self, name: &str) -> Result<Option<TagId>, StoreError> {
        Ok(self
            .tx
            .query_row(
                "SELECT id FROM tags WHERE name=?1",
                params![name],
                |row| row.get::<_, i64>(0),
            )
            .optional()?
            .map(TagId::new))
    }

    pub(crate) fn insert(&self, name: &str) -> Result<TagId, StoreError> {
        self.tx
            .execute("INSERT INTO tags(name) VALUES (?1)", params![name])
            .map_err(|err| map_tag_insert_error(err, name))?;
        let id = TagId::new(self.tx.last_insert_rowid());
        debug!(tag = name, %id, "tag created");
        Ok(id)
    }

    pub fn exists(&self, id: TagId) -> Result<bool, StoreError> {
        Ok(self
            .tx
            .query_row(
                "SELECT 1 FROM tags WHERE id=?1",
                params![id.get()],
                |row| row.get::<_, i64>(0),
            )
            .optional()?
            .is_some())
    }

    pub fn association_count(&self, id: TagId) -> Result<i64, StoreError> {
        Ok(self.tx.query_row(
            "SELECT COUNT(1) FROM items_tags WHERE tag_id=?1",
            params![id.get()],
            |row| row.get::<_, i64>(0),
        )?)
    }

    /// Deletes the tag when nothing references it any more.
    pub fn delete_if_orphan(&self, id: TagId) -> Result<bool, StoreError> {
        if self.association_count(id)? > 0 {
            return Ok(false);
        }
        let deleted = self
            .tx
            .execute("DELETE FROM tags WHERE id=?1", params![id.get()])?;
        if deleted > 0 {
            debug!(%id, "orphan tag deleted");
        }
        Ok(deleted > 0)
    }

    pub fn list(&self) -> Result<Vec<Tag>, StoreError> {
        let mut stmt = self
            .tx
            .prepare("SELECT id, name FROM tags ORDER BY id ASC")?;
        let rows = stmt.query_map([], |row| {
            Ok(Tag {
                id: TagId::new(row.get(0)?),
                name: row.get(1)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}
