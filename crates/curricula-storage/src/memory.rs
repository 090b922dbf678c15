//! In-memory implementation of [`KvStore`].
//!
//! [`InMemoryStore`] is a first-class backend for tests and ephemeral servers.
//! Data lives in a `BTreeMap` behind an `RwLock`; a batch is applied while
//! holding the write lock, so it is both atomic and isolated.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;

use curricula_core::{Batch, BatchOp};

use crate::error::StorageError;
use crate::traits::KvStore;

#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: RwLock<BTreeMap<String, Value>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<String, Value>>, StorageError> {
        self.entries
            .read()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<String, Value>>, StorageError> {
        self.entries
            .write()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))
    }
}

impl KvStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.read()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        self.write()?.insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.write()?.remove(key).is_some())
    }

    fn mget(&self, keys: &[String]) -> Result<Vec<Option<Value>>, StorageError> {
        let entries = self.read()?;
        Ok(keys.iter().map(|k| entries.get(k).cloned()).collect())
    }

    fn exec(&self, batch: Batch) -> Result<(), StorageError> {
        let mut entries = self.write()?;
        for op in batch.into_ops() {
            match op {
                BatchOp::Set { key, value } => {
                    entries.insert(key, value);
                }
                BatchOp::Delete { key } => {
                    entries.remove(&key);
                }
            }
        }
        Ok(())
    }

    fn scan_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let entries = self.read()?;
        Ok(entries
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, _)| k.clone())
            .collect())
    }
}
