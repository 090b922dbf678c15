//! Storage error types for curricula-storage.
//!
//! [`StorageError`] covers every failure that can cross the persistence
//! boundary: backend errors, schema setup, undecodable records and lock
//! poisoning.

use thiserror::Error;

/// Errors produced by storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The SQLite backend reported an error.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Applying schema migrations failed.
    #[error("migration error: {0}")]
    Migration(String),

    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored value did not decode into the expected record.
    #[error("corrupt record at '{key}': {reason}")]
    CorruptRecord { key: String, reason: String },

    /// A lock guarding backend state was poisoned by a panicking writer.
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),

    /// The backend could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
