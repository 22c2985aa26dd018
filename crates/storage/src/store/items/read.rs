#![forbid(unsafe_code)]

use super::super::*;
use bk_core::{Item, ItemId, ItemKind, ItemTagRow, Tag, TagId, fold_item_rows};
use rusqlite::{Params, params};

const ITEM_TAG_ROWS: &str = r#"
    SELECT i.id, i.title, i.url, i.type, i.starred, i.read, i.notes, i.favicon_url,
           i.created_at_ms, i.updated_at_ms, t.id, t.name
    FROM items i
    LEFT JOIN items_tags it ON it.item_id = i.id
    LEFT JOIN tags t ON t.id = it.tag_id
"#;

impl SqliteStore {
    /// All items in ascending id order, each with its tags in association order.
    pub fn items_list(&self) -> Result<Vec<Item>, StoreError> {
        self.read(|tx| item_rows_tx(tx, "ORDER BY i.id ASC, it.rowid ASC", []))
    }

    pub fn item_get(&self, id: &ItemId) -> Result<Item, StoreError> {
        self.read(|tx| {
            item_rows_tx(tx, "WHERE i.id = ?1 ORDER BY it.rowid ASC", params![id.as_str()])?
                .into_iter()
                .next()
                .ok_or(StoreError::UnknownId)
        })
    }

    /// First item (by id) whose url matches exactly.
    pub fn item_find_by_url(&self, url: &str) -> Result<Option<Item>, StoreError> {
        self.read(|tx| {
            Ok(item_rows_tx(
                tx,
                "WHERE i.id = (SELECT id FROM items WHERE url = ?1 ORDER BY id ASC LIMIT 1) \
                 ORDER BY it.rowid ASC",
                params![url],
            )?
            .into_iter()
            .next())
        })
    }

    pub fn tags_list(&self) -> Result<Vec<Tag>, StoreError> {
        self.read(|tx| TagRegistry::new(tx).list())
    }
}

fn item_tag_rows_sql(tail: &str) -> String {
    format!("{ITEM_TAG_ROWS} {tail}")
}

fn item_rows_tx<P: Params>(
    tx: &Transaction<'_>,
    tail: &str,
    params: P,
) -> Result<Vec<Item>, StoreError> {
    let mut stmt = tx.prepare(&item_tag_rows_sql(tail))?;
    let mut rows = stmt.query(params)?;
    let mut out = Vec::new();

    while let Some(row) = rows.next()? {
        let tag = match (row.get::<_, Option<i64>>(10)?, row.get::<_, Option<String>>(11)?) {
            (Some(id), Some(name)) => Some(Tag {
                id: TagId::new(id),
                name,
            }),
            _ => None,
        };
        let id = ItemId::try_new(row.get::<_, String>(0)?)
            .map_err(|_| StoreError::Corrupt("stored item id is not a valid id"))?;
        let kind = row
            .get::<_, String>(3)?
            .parse::<ItemKind>()
            .map_err(|_| StoreError::Corrupt("stored item type is unknown"))?;
        out.push(ItemTagRow {
            item: Item {
                id,
                title: row.get(1)?,
                url: row.get(2)?,
                kind,
                starred: row.get(4)?,
                read: row.get(5)?,
                notes: row.get(6)?,
                favicon_url: row.get(7)?,
                created_at_ms: row.get(8)?,
                updated_at_ms: row.get(9)?,
                tags: Vec::new(),
            },
            tag,
        });
    }

    Ok(fold_item_rows(out))
}
