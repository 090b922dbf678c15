//! Atomic write batches.
//!
//! A [`Batch`] is an ordered queue of set/delete operations that a store
//! commits all-or-nothing. Operations on the same key resolve in queue order.

use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;

/// A single queued store operation.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOp {
    Set { key: String, value: Value },
    Delete { key: String },
}

impl BatchOp {
    pub fn key(&self) -> &str {
        match self {
            BatchOp::Set { key, .. } | BatchOp::Delete { key } => key,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    ops: Vec<BatchOp>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) -> &mut Self {
        self.ops.push(BatchOp::Set {
            key: key.into(),
            value,
        });
        self
    }

    /// Queues a set of `record` serialized to JSON.
    pub fn set_record<T: Serialize>(
        &mut self,
        key: impl Into<String>,
        record: &T,
    ) -> Result<&mut Self, CoreError> {
        let value = serde_json::to_value(record)?;
        Ok(self.set(key, value))
    }

    pub fn delete(&mut self, key: impl Into<String>) -> &mut Self {
        self.ops.push(BatchOp::Delete { key: key.into() });
        self
    }

    pub fn ops(&self) -> &[BatchOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<BatchOp> {
        self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}
