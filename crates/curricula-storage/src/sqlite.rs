//! SQLite implementation of [`KvStore`].
//!
//! [`SqliteStore`] persists the namespace in a single `kv_entries` table with
//! WAL mode and automatic schema migrations. Values are JSON TEXT. Every batch
//! runs inside one transaction, so a failing operation rolls back the whole
//! batch.

use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;

use curricula_core::{Batch, BatchOp};

use crate::error::StorageError;
use crate::traits::KvStore;

const UPSERT_SQL: &str = "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
     ON CONFLICT(key) DO UPDATE SET value = excluded.value";
const DELETE_SQL: &str = "DELETE FROM kv_entries WHERE key = ?1";
const SELECT_SQL: &str = "SELECT value FROM kv_entries WHERE key = ?1";

/// SQLite-backed implementation of [`KvStore`].
///
/// `rusqlite::Connection` is `!Sync`, so the connection sits behind a `Mutex`
/// and every call holds it for its whole duration.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (or creates) a SQLite database at `path`.
    pub fn new(path: &str) -> Result<Self, StorageError> {
        let conn = crate::schema::open_database(path)?;
        Ok(SqliteStore {
            conn: Mutex::new(conn),
        })
    }

    /// Opens the SQLite database at `path`, which must already exist.
    pub fn open_existing(path: &str) -> Result<Self, StorageError> {
        let conn = crate::schema::open_existing_database(path)?;
        Ok(SqliteStore {
            conn: Mutex::new(conn),
        })
    }

    /// Opens an in-memory SQLite database (for testing).
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = crate::schema::open_in_memory()?;
        Ok(SqliteStore {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn
            .lock()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))
    }

    fn decode(text: &str) -> Result<Value, StorageError> {
        Ok(serde_json::from_str(text)?)
    }
}

impl KvStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let conn = self.conn()?;
        let text: Option<String> = conn
            .query_row(SELECT_SQL, params![key], |row| row.get(0))
            .optional()?;
        text.as_deref().map(Self::decode).transpose()
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let text = serde_json::to_string(&value)?;
        self.conn()?.execute(UPSERT_SQL, params![key, text])?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool, StorageError> {
        let removed = self.conn()?.execute(DELETE_SQL, params![key])?;
        Ok(removed > 0)
    }

    fn mget(&self, keys: &[String]) -> Result<Vec<Option<Value>>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(SELECT_SQL)?;
        let mut out = Vec::with_capacity(keys.len());
        for key in keys {
            let text: Option<String> = stmt
                .query_row(params![key], |row| row.get(0))
                .optional()?;
            out.push(text.as_deref().map(Self::decode).transpose()?);
        }
        Ok(out)
    }

    fn exec(&self, batch: Batch) -> Result<(), StorageError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        for op in batch.ops() {
            match op {
                BatchOp::Set { key, value } => {
                    let text = serde_json::to_string(value)?;
                    tx.execute(UPSERT_SQL, params![key, text])?;
                }
                BatchOp::Delete { key } => {
                    tx.execute(DELETE_SQL, params![key])?;
                }
            }
        }
        tx.commit()?;
        tracing::trace!(ops = batch.len(), "committed batch");
        Ok(())
    }

    fn scan_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let conn = self.conn()?;
        let keys = match prefix_upper_bound(prefix) {
            Some(upper) => {
                let mut stmt = conn.prepare_cached(
                    "SELECT key FROM kv_entries WHERE key >= ?1 AND key < ?2 ORDER BY key",
                )?;
                let rows = stmt.query_map(params![prefix, upper], |row| row.get::<_, String>(0))?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = conn.prepare_cached(
                    "SELECT key FROM kv_entries WHERE key >= ?1 ORDER BY key",
                )?;
                let rows = stmt.query_map(params![prefix], |row| row.get::<_, String>(0))?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
        };
        Ok(keys)
    }
}

/// Smallest string greater than every string starting with `prefix`.
///
/// Keys compare as UTF-8 bytes, which follows code point order, so bumping the
/// last code point that can be bumped gives a tight exclusive bound for a
/// range scan over the primary key. `None` means the scan is unbounded above.
fn prefix_upper_bound(prefix: &str) -> Option<String> {
    let mut chars: Vec<char> = prefix.chars().collect();
    while let Some(last) = chars.pop() {
        let next = match last {
            '\u{D7FF}' => Some('\u{E000}'),
            c => char::from_u32(c as u32 + 1),
        };
        if let Some(next) = next {
            chars.push(next);
            return Some(chars.into_iter().collect());
        }
    }
    None
}
