//! Persistence for the product collection
//!
//! Two layers:
//!
//! - [`KeyValueStore`]: an opaque string get/set, the local-storage analogue.
//!   Backends: [`InMemoryKeyValueStore`] and [`FileKeyValueStore`].
//! - [`PersistenceAdapter`]: the narrow `read_all` / `write_all` contract the
//!   store talks to. [`BlobAdapter`] implements it on top of any key-value
//!   backend by keeping the whole collection as one JSON array under one key.
//!
//! Only the store touches the adapter.

pub mod file;
pub mod in_memory;

pub use file::FileKeyValueStore;
pub use in_memory::InMemoryKeyValueStore;

use crate::core::entity::ProductRecord;
use crate::core::error::{InventoryResult, StorageError};
use serde_json::Value;

/// Default key the collection is stored under
pub const DEFAULT_STORAGE_KEY: &str = "products";

/// An opaque string key/value backend.
///
/// `set` must replace the whole value atomically: a reader sees either the
/// old or the new value, never a mix.
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`; `Ok(None)` when absent
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    /// Replace the value under `key`
    fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
}

/// Whole-collection persistence contract
pub trait PersistenceAdapter: Send + Sync {
    /// Every persisted record; missing or corrupt data reads as empty
    fn read_all(&self) -> Vec<ProductRecord>;

    /// Replace the persisted collection with `records`
    fn write_all(&self, records: &[ProductRecord]) -> InventoryResult<()>;
}

/// Stores the collection as a JSON array under a single key
#[derive(Debug, Clone)]
pub struct BlobAdapter<K> {
    backend: K,
    key: String,
}

impl<K: KeyValueStore> BlobAdapter<K> {
    pub fn new(backend: K) -> Self {
        Self::with_key(backend, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(backend: K, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &K {
        &self.backend
    }

    /// Read the collection, surfacing read failures and a blob that is not
    /// a JSON array.
    ///
    /// Entries that do not decode as products are skipped with a warning;
    /// the rest are kept.
    pub fn try_read_all(&self) -> InventoryResult<Vec<ProductRecord>> {
        let blob = self
            .backend
            .get(&self.key)
            .map_err(|e| StorageError::ReadFailed {
                key: self.key.clone(),
                message: e.to_string(),
            })?;

        let text = match blob {
            None => return Ok(Vec::new()),
            Some(text) if text.trim().is_empty() || text.trim() == "null" => {
                return Ok(Vec::new());
            }
            Some(text) => text,
        };

        let entries: Vec<Value> =
            serde_json::from_str(&text).map_err(|e| StorageError::ReadFailed {
                key: self.key.clone(),
                message: format!("corrupt blob: {}", e),
            })?;

        Ok(entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                serde_json::from_value::<ProductRecord>(entry)
                    .inspect_err(|e| {
                        tracing::warn!(key = %self.key, index, error = %e, "Skipping unreadable product");
                    })
                    .ok()
            })
            .collect())
    }
}

impl<K: KeyValueStore> PersistenceAdapter for BlobAdapter<K> {
    fn read_all(&self) -> Vec<ProductRecord> {
        match self.try_read_all() {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Treating unreadable product storage as empty");
                Vec::new()
            }
        }
    }

    fn write_all(&self, records: &[ProductRecord]) -> InventoryResult<()> {
        let blob = serde_json::to_string(records)?;
        self.backend
            .set(&self.key, &blob)
            .map_err(|e| StorageError::WriteFailed {
                key: self.key.clone(),
                message: e.to_string(),
            })?;
        tracing::debug!(key = %self.key, count = records.len(), "Persisted products");
        Ok(())
    }
}
