//! Shared fixtures for store and controller integration tests
//!
//! Provides a fixed clock, a draft builder, record seeding helpers and a
//! temp-dir-backed file store for the adapter contract suite.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod store_harness;
//! use store_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod adapter_tests;

use chrono::NaiveDate;
use std::sync::Arc;
use tempfile::TempDir;

use stockroom::core::clock::FixedClock;
use stockroom::core::draft::{DraftField, ProductDraft};
use stockroom::core::entity::{Category, ProductRecord};
use stockroom::core::store::ProductStore;
use stockroom::storage::{BlobAdapter, FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore};

/// The date every fixture clock reports
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn fixed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(today()))
}

// ---------------------------------------------------------------------------
// Drafts
// ---------------------------------------------------------------------------

/// Builds drafts the way a user fills the form: one raw string per field
#[derive(Default)]
pub struct DraftBuilder {
    draft: ProductDraft,
}

impl DraftBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, field: DraftField, raw: &str) -> Self {
        self.draft.apply(field, raw);
        self
    }

    pub fn build(self) -> ProductDraft {
        self.draft
    }
}

/// A complete, valid draft
pub fn valid_draft(name: &str, category: &str, cost: &str, sell: &str, discount: &str) -> ProductDraft {
    DraftBuilder::new()
        .set(DraftField::Name, name)
        .set(DraftField::Category, category)
        .set(DraftField::CostPrice, cost)
        .set(DraftField::SellPrice, sell)
        .set(DraftField::Discount, discount)
        .build()
}

/// The Milk draft used by the basic add scenario
pub fn milk_draft() -> ProductDraft {
    valid_draft("Milk", "Dairy", "10", "20", "10")
}

// ---------------------------------------------------------------------------
// Records and stores
// ---------------------------------------------------------------------------

pub fn record(id: &str, name: &str, category: Category, cost: f64) -> ProductRecord {
    ProductRecord::new(id, name, category, None, None, cost, cost * 2.0, 0.0)
}

/// An empty, loaded store over a fresh in-memory backend.
///
/// The backend handle is returned so tests can inspect writes.
pub fn memory_store(page_size: usize) -> (ProductStore, InMemoryKeyValueStore) {
    let backend = InMemoryKeyValueStore::new();
    let mut store = ProductStore::new(
        Box::new(BlobAdapter::new(backend.clone())),
        fixed_clock(),
        page_size,
    );
    store.load();
    (store, backend)
}

/// A loaded store whose backend already holds `records`.
///
/// Seeding counts as one backend write; tests compare against a baseline.
pub fn seeded_store(records: Vec<ProductRecord>, page_size: usize) -> (ProductStore, InMemoryKeyValueStore) {
    let backend = InMemoryKeyValueStore::new();
    let blob = serde_json::to_string(&records).unwrap();
    backend.set("products", &blob).unwrap();

    let mut store = ProductStore::new(
        Box::new(BlobAdapter::new(backend.clone())),
        fixed_clock(),
        page_size,
    );
    store.load();
    (store, backend)
}

/// `count` snack records with ids "1".."count" and cost equal to the id
pub fn numbered(count: usize) -> Vec<ProductRecord> {
    (1..=count)
        .map(|i| record(&i.to_string(), &format!("Item {}", i), Category::Snacks, i as f64))
        .collect()
}

// ---------------------------------------------------------------------------
// File backend owning its scratch directory
// ---------------------------------------------------------------------------

/// A [`FileKeyValueStore`] that deletes its directory when dropped
pub struct ScratchFileStore {
    _dir: TempDir,
    inner: FileKeyValueStore,
}

impl ScratchFileStore {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let inner = FileKeyValueStore::open(dir.path()).unwrap();
        Self { _dir: dir, inner }
    }
}

impl KeyValueStore for ScratchFileStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.inner.set(key, value)
    }
}
