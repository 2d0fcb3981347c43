//! Configuration loading and management

use crate::core::clock::SystemClock;
use crate::core::error::ConfigError;
use crate::core::query::DEFAULT_PAGE_SIZE;
use crate::core::store::ProductStore;
use crate::storage::{
    BlobAdapter, DEFAULT_STORAGE_KEY, FileKeyValueStore, InMemoryKeyValueStore, PersistenceAdapter,
};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Where the product blob is kept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StorageConfig {
    /// Process memory; lost on exit
    #[default]
    Memory,
    /// One JSON file per key under `dir`
    File { dir: PathBuf },
}

/// Complete configuration for an inventory instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryConfig {
    /// Rows per list page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Key the collection is stored under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    #[serde(default)]
    pub storage: StorageConfig,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

impl InventoryConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::Error::new(ConfigError::FileNotFound {
                    path: path.to_string(),
                })
            } else {
                anyhow::Error::new(e)
            }
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// In-memory storage, ten rows per page
    pub fn default_config() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            storage: StorageConfig::Memory,
        }
    }

    /// Check values serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "page_size".to_string(),
                value: "0".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "storage_key".to_string(),
                value: self.storage_key.clone(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Build the persistence adapter this configuration describes
    pub fn open_adapter(&self) -> Result<Box<dyn PersistenceAdapter>> {
        Ok(match &self.storage {
            StorageConfig::Memory => Box::new(BlobAdapter::with_key(
                InMemoryKeyValueStore::new(),
                &self.storage_key,
            )),
            StorageConfig::File { dir } => Box::new(BlobAdapter::with_key(
                FileKeyValueStore::open(dir)?,
                &self.storage_key,
            )),
        })
    }

    /// Build and load the process-wide store
    pub fn open_store(&self) -> Result<ProductStore> {
        self.validate()?;
        let mut store =
            ProductStore::new(self.open_adapter()?, Arc::new(SystemClock), self.page_size);
        store.load();
        tracing::info!(page_size = self.page_size, key = %self.storage_key, "Opened product store");
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = InventoryConfig::default_config();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.storage_key, "products");
        assert_eq!(config.storage, StorageConfig::Memory);
    }

    #[test]
    fn test_yaml_serialization() {
        let config = InventoryConfig {
            page_size: 25,
            storage_key: "shop".to_string(),
            storage: StorageConfig::File {
                dir: PathBuf::from("/tmp/shop"),
            },
        };
        let yaml = serde_yaml::to_string(&config).unwrap();

        let parsed = InventoryConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let parsed = InventoryConfig::from_yaml_str("page_size: 5\n").unwrap();
        assert_eq!(parsed.page_size, 5);
        assert_eq!(parsed.storage_key, "products");
        assert_eq!(parsed.storage, StorageConfig::Memory);
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        assert!(InventoryConfig::from_yaml_str("page_size: 0\n").is_err());
    }

    #[test]
    fn test_open_store_in_memory() {
        let store = InventoryConfig::default_config().open_store().unwrap();
        assert!(store.items().is_empty());
        assert_eq!(store.view().page_size, 10);
    }
}
