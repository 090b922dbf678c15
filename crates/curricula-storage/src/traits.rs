//! The [`KvStore`] trait defining the storage contract for the catalog.
//!
//! The contract is the one a hosted key-value service offers: single-key
//! get/set/delete, a multi-key get, an atomic batch of set/delete operations,
//! and prefix-matched key iteration. Values are JSON documents.
//!
//! The trait is synchronous and object safe; handlers share one store as
//! `Arc<dyn KvStore>`. Typed record access lives in [`KvStoreExt`], which is
//! blanket-implemented for every store including trait objects.

use serde::de::DeserializeOwned;
use serde_json::Value;

use curricula_core::Batch;

use crate::error::StorageError;

/// The storage contract for the key-value namespace.
///
/// Implementations must apply [`KvStore::exec`] all-or-nothing. Scans carry no
/// snapshot guarantee: keys written during a scan may or may not be seen.
pub trait KvStore: Send + Sync {
    /// Returns the value at `key`, if any.
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Stores `value` at `key`, overwriting any previous value.
    fn set(&self, key: &str, value: Value) -> Result<(), StorageError>;

    /// Deletes `key`. Returns whether a value was removed.
    fn delete(&self, key: &str) -> Result<bool, StorageError>;

    /// Fetches many keys in one call.
    ///
    /// The result is positional: element `i` belongs to `keys[i]`.
    fn mget(&self, keys: &[String]) -> Result<Vec<Option<Value>>, StorageError>;

    /// Commits every queued operation of `batch` atomically, in queue order.
    fn exec(&self, batch: Batch) -> Result<(), StorageError>;

    /// Lists every key starting with `prefix`, in ascending key order.
    fn scan_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError>;
}

fn decode<T: DeserializeOwned>(key: &str, value: Value) -> Result<T, StorageError> {
    serde_json::from_value(value).map_err(|e| StorageError::CorruptRecord {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

/// Typed record access on top of [`KvStore`].
pub trait KvStoreExt: KvStore {
    /// Reads and decodes the record at `key`.
    fn get_record<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        self.get(key)?.map(|value| decode(key, value)).transpose()
    }

    /// Reads and decodes many records in one round trip, keyed by their key.
    ///
    /// Absent keys are omitted from the result.
    fn get_records<T: DeserializeOwned>(
        &self,
        keys: &[String],
    ) -> Result<Vec<(String, T)>, StorageError> {
        let values = self.mget(keys)?;
        let mut out = Vec::with_capacity(values.len());
        for (key, value) in keys.iter().zip(values) {
            if let Some(value) = value {
                out.push((key.clone(), decode(key, value)?));
            }
        }
        Ok(out)
    }
}

impl<S: KvStore + ?Sized> KvStoreExt for S {}
