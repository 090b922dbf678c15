//! Key-value persistence boundary for the curricula catalog.
//!
//! Provides the [`KvStore`] trait defining the storage contract that all
//! backends implement, plus [`InMemoryStore`] and [`SqliteStore`] as
//! first-class backends.
//!
//! # Modules
//!
//! - [`error`]: StorageError enum with all failure modes
//! - [`traits`]: KvStore trait and the typed [`KvStoreExt`] helpers
//! - [`memory`]: InMemoryStore implementation
//! - [`schema`]: SQLite migration setup
//! - [`sqlite`]: SqliteStore implementation

pub mod error;
pub mod memory;
pub mod schema;
pub mod sqlite;
pub mod traits;

#[cfg(test)]
mod conformance;

// Re-export key types for ergonomic use.
pub use error::StorageError;
pub use memory::InMemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{KvStore, KvStoreExt};
