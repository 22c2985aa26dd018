#![forbid(unsafe_code)]

use super::super::StoreError;
use rusqlite::ffi;
use tracing::warn;

/// A failed tag insert means another writer created the same name first, either
/// caught by the UNIQUE constraint or by SQLite refusing a write on a stale
/// snapshot. Anything else is a plain storage failure.
pub(in crate::store) fn map_tag_insert_error(err: rusqlite::Error, name: &str) -> StoreError {
    if is_unique_violation(&err) || is_busy_snapshot(&err) {
        warn!(tag = name, "tag creation lost a race with a concurrent writer");
        return StoreError::Conflict(format!("tag {name:?} was created concurrently"));
    }
    StoreError::Sql(err)
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(code, message) => {
            code.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
                || code.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                || message.as_deref().is_some_and(|value| {
                    value.contains("UNIQUE constraint failed")
                        || value.contains("PRIMARY KEY constraint failed")
                })
        }
        _ => false,
    }
}

fn is_busy_snapshot(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(code, _) if code.extended_code == ffi::SQLITE_BUSY_SNAPSHOT
    )
}
