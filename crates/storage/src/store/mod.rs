#![forbid(unsafe_code)]

mod error;
mod items;
mod reconcile;
mod registry;
mod requests;
mod support;

pub use error::{ErrorKind, StoreError};
pub use reconcile::{AssociationReconciler, ReconcileOutcome};
pub use registry::TagRegistry;
pub use requests::*;

use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::path::{Path, PathBuf};
use std::time::Duration;
use support::*;
use tracing::debug;

pub const DB_FILE_NAME: &str = "bookmarks.db";

/// SQLite-backed catalog store.
///
/// Every mutating operation runs inside exactly one [`SqliteStore::atomic`]
/// scope; read paths go through [`SqliteStore::read`].
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    storage_dir: PathBuf,
}

impl SqliteStore {
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let storage_dir = storage_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&storage_dir)?;

        let db_path = storage_dir.join(DB_FILE_NAME);
        let conn = Connection::open(&db_path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        migrate_sqlite_schema(&conn)?;
        debug!(path = %db_path.display(), "catalog store opened");

        Ok(Self { conn, storage_dir })
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    pub fn db_path(&self) -> PathBuf {
        self.storage_dir.join(DB_FILE_NAME)
    }

    /// Runs `op` inside one write transaction.
    ///
    /// The writer lock is taken when the scope opens. `Ok` commits; `Err` (or a
    /// panic) drops the transaction, which rolls back every write made in the
    /// scope. A failed commit is reported and leaves nothing applied.
    pub fn atomic<T, F>(&mut self, op: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T, StoreError>,
    {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let value = op(&tx)?;
        tx.commit()?;
        Ok(value)
    }

    /// Runs `op` inside a deferred transaction so multi-statement reads share
    /// one snapshot.
    pub fn read<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T, StoreError>,
    {
        let tx = self.conn.unchecked_transaction()?;
        let value = op(&tx)?;
        tx.commit()?;
        Ok(value)
    }
}
