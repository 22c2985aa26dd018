#![forbid(unsafe_code)]

mod migrations;
mod sql;

use super::super::StoreError;
use rusqlite::{Connection, params};
use tracing::debug;

const SCHEMA_VERSION: &str = "v2";

pub(in crate::store) fn migrate_sqlite_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(sql::TABLES)?;
    conn.execute_batch(&sql::items_table("items"))?;

    migrations::apply(conn, super::now_ms())?;

    // Indexes reference migrated columns, so they go last.
    conn.execute_batch(sql::INDEXES)?;

    conn.execute(
        "INSERT INTO meta(key, value) VALUES (?1, ?2) \
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params!["schema_version", SCHEMA_VERSION],
    )?;
    debug!(version = SCHEMA_VERSION, "schema ready");

    Ok(())
}
