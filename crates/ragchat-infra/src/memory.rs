//! In-memory key-value store.
//!
//! `MemoryKvStore` is a concurrent map backed by `DashMap`. Values are
//! cloned on read so no `DashMap` guard outlives the call. Used when the
//! client runs with `--ephemeral` and nothing should touch disk.

use std::sync::Arc;

use dashmap::DashMap;

use ragchat_core::storage::kv_store::KvStore;
use ragchat_types::error::StorageError;

/// Process-local implementation of `KvStore`.
///
/// Cloning produces a shared view of the same underlying data.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    inner: Arc<DashMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.inner.get(key).map(|r| r.value().clone()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
