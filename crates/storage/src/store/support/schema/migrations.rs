#![forbid(unsafe_code)]

use super::super::super::StoreError;
use super::sql::items_table;
use rusqlite::{Connection, params};
use tracing::{debug, warn};

/// Brings an `items` table created by an older build up to the current shape.
///
/// Tables that kept timestamps as `created_at`/`updated_at` text are rebuilt
/// with those values converted to milliseconds. Tables missing columns get
/// them added; rows that predate the timestamp columns get `now` as their
/// creation time.
pub(super) fn apply(conn: &Connection, now_ms: i64) -> Result<(), StoreError> {
    if has_column(conn, "items", "created_at")? {
        rebuild_items_from_text_timestamps(conn, now_ms)?;
    }

    add_column_if_missing(conn, "items", "starred", "INTEGER NOT NULL DEFAULT 0")?;
    add_column_if_missing(conn, "items", "created_at_ms", "INTEGER NOT NULL DEFAULT 0")?;
    add_column_if_missing(conn, "items", "updated_at_ms", "INTEGER NOT NULL DEFAULT 0")?;
    add_column_if_missing(
        conn,
        "items",
        "type",
        "TEXT NOT NULL DEFAULT 'bookmark' CHECK(type IN ('bookmark', 'reading-list'))",
    )?;
    add_column_if_missing(conn, "items", "read", "INTEGER NOT NULL DEFAULT 0")?;
    add_column_if_missing(conn, "items", "notes", "TEXT")?;
    add_column_if_missing(conn, "items", "favicon_url", "TEXT")?;

    conn.execute(
        "UPDATE items SET created_at_ms = ?1, updated_at_ms = MAX(updated_at_ms, ?1) \
         WHERE created_at_ms = 0",
        params![now_ms],
    )?;
    Ok(())
}

/// Table rebuild: create the current shape under a scratch name, copy, drop the
/// old table and rename. Foreign keys are off for the swap so the old table can
/// be dropped while `items_tags` still points at it.
fn rebuild_items_from_text_timestamps(conn: &Connection, now_ms: i64) -> Result<(), StoreError> {
    conn.execute_batch("PRAGMA foreign_keys = OFF;")?;
    let rebuilt = copy_into_rebuilt_items(conn, now_ms);
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    let (copied, dropped_links) = rebuilt?;
    if dropped_links > 0 {
        warn!(dropped_links, "dangling tag associations removed during items rebuild");
    }
    debug!(rows = copied, "items rebuilt with millisecond timestamps");
    Ok(())
}

fn copy_into_rebuilt_items(conn: &Connection, now_ms: i64) -> Result<(usize, usize), StoreError> {
    let starred = if has_column(conn, "items", "starred")? {
        "COALESCE(starred, 0)"
    } else {
        "0"
    };

    let tx = conn.unchecked_transaction()?;
    tx.execute_batch("DROP TABLE IF EXISTS items_next;")?;
    tx.execute_batch(&items_table("items_next"))?;

    // Unparseable creation times fall back to `now`; update times never precede
    // creation.
    let copied = tx.execute(
        &format!(
            r#"
            INSERT INTO items_next(id, title, url, starred, created_at_ms, updated_at_ms)
            SELECT id, title, url, starred_flag, created_ms,
                   MAX(created_ms, COALESCE(updated_ms, created_ms))
            FROM (
              SELECT id, title, url, {starred} AS starred_flag,
                     COALESCE(CAST(strftime('%s', created_at) AS INTEGER) * 1000, ?1) AS created_ms,
                     CAST(strftime('%s', updated_at) AS INTEGER) * 1000 AS updated_ms
              FROM items
            )
            "#
        ),
        params![now_ms],
    )?;
    tx.execute_batch(
        r#"
        DROP TABLE items;
        ALTER TABLE items_next RENAME TO items;
        "#,
    )?;

    // Older builds never enforced foreign keys; orphans must not survive the swap.
    let dropped_links = tx.execute(
        r#"
        DELETE FROM items_tags
        WHERE item_id IS NULL OR tag_id IS NULL
           OR item_id NOT IN (SELECT id FROM items)
           OR tag_id NOT IN (SELECT id FROM tags)
        "#,
        [],
    )?;
    tx.execute(
        "DELETE FROM tags WHERE id NOT IN (SELECT tag_id FROM items_tags WHERE tag_id IS NOT NULL)",
        [],
    )?;

    tx.commit()?;
    Ok((copied, dropped_links))
}

fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool, StoreError> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table})"))?;
    let names = stmt.query_map([], |row| row.get::<_, String>(1))?;
    for name in names {
        if name? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn add_column_if_missing(
    conn: &Connection,
    table: &str,
    column: &str,
    decl: &str,
) -> Result<(), StoreError> {
    let sql = format!("ALTER TABLE {table} ADD COLUMN {column} {decl}");
    match conn.execute(&sql, []) {
        Ok(_) => Ok(()),
        Err(err) if is_duplicate_column(&err) => Ok(()),
        Err(err) => Err(StoreError::Sql(err)),
    }
}

fn is_duplicate_column(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(_, Some(message)) => {
            message.contains("duplicate column name")
        }
        _ => false,
    }
}
