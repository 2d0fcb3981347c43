//! The product store: canonical collection plus view state
//!
//! The store is the single source of truth for products. Every operation that
//! changes `items` writes the full list through the persistence adapter
//! exactly once; view-state setters never touch storage.
//!
//! # Example
//!
//! ```rust,ignore
//! let adapter = BlobAdapter::new(InMemoryKeyValueStore::new());
//! let mut store = ProductStore::new(Box::new(adapter), Arc::new(SystemClock), 10);
//! store.load();
//!
//! let saved = store.add(draft)?;
//! store.set_search("milk");
//! let page = store.visible_page();
//! ```

use crate::core::clock::Clock;
use crate::core::draft::ProductDraft;
use crate::core::entity::{Category, ProductRecord};
use crate::core::error::{EntityError, InventoryResult};
use crate::core::field::SortField;
use crate::core::query::{self, QueryOutcome, SortSpec, ViewState};
use crate::core::validation;
use crate::storage::PersistenceAdapter;
use std::collections::HashSet;
use std::sync::Arc;

/// Message shown when a write to storage fails
pub const WRITE_FAILED_MESSAGE: &str = "Failed to save products";

/// Load/feedback status of the store.
///
/// The error message lives inside [`LoadStatus::Error`], so the store is in
/// the error status exactly when a message is present.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Error(String),
}

impl LoadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadStatus::Idle => "idle",
            LoadStatus::Loading => "loading",
            LoadStatus::Error(_) => "error",
        }
    }
}

/// Owns the product collection, the view state and the persistence adapter
pub struct ProductStore {
    items: Vec<ProductRecord>,
    view: ViewState,
    status: LoadStatus,
    adapter: Box<dyn PersistenceAdapter>,
    clock: Arc<dyn Clock>,
}

impl ProductStore {
    /// Create an empty store; call [`ProductStore::load`] to read storage
    pub fn new(
        adapter: Box<dyn PersistenceAdapter>,
        clock: Arc<dyn Clock>,
        page_size: usize,
    ) -> Self {
        Self {
            items: Vec::new(),
            view: ViewState::new(page_size),
            status: LoadStatus::Idle,
            adapter,
            clock,
        }
    }

    /// Read the persisted collection, replacing the in-memory items
    pub fn load(&mut self) {
        self.items = self.adapter.read_all();
        tracing::info!(count = self.items.len(), "Loaded products");
    }

    // === Reads ===

    pub fn items(&self) -> &[ProductRecord] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&ProductRecord> {
        self.items.iter().find(|p| p.id == id)
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            LoadStatus::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Shared handle to the store's clock
    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    /// Id the next created record receives: highest numeric id + 1.
    ///
    /// Ids that are not numbers are ignored. Fails when the highest id is
    /// `u64::MAX`.
    pub fn next_id(&self) -> InventoryResult<String> {
        let last = self
            .items
            .iter()
            .filter_map(ProductRecord::numeric_id)
            .max()
            .unwrap_or(0);
        let next = last.checked_add(1).ok_or_else(|| EntityError::IdsExhausted {
            last: last.to_string(),
        })?;
        Ok(next.to_string())
    }

    // === Mutations ===

    /// Validate a draft, assign it the next id, append it and persist
    pub fn add(&mut self, draft: ProductDraft) -> InventoryResult<ProductRecord> {
        let report = validation::validate(&draft, self.clock.today());
        if !report.is_valid() {
            tracing::debug!(violations = report.len(), "Rejected invalid product");
            return Err(report.into_error());
        }

        let id = self.next_id()?;
        if self.get(&id).is_some() {
            return Err(EntityError::AlreadyExists { id }.into());
        }
        let record = draft.to_record(id).ok_or_else(|| report.into_error())?;

        self.items.push(record.clone());
        tracing::debug!(id = %record.id, name = %record.name, "Added product");
        self.persist()?;
        Ok(record)
    }

    /// Replace the record with the same id in place and persist.
    ///
    /// An unknown id fails with `NotFound` and writes nothing.
    pub fn update(&mut self, record: ProductRecord) -> InventoryResult<ProductRecord> {
        validation::validate(&ProductDraft::from(&record), self.clock.today()).into_result()?;

        let slot = self
            .items
            .iter_mut()
            .find(|p| p.id == record.id)
            .ok_or_else(|| EntityError::NotFound {
                id: record.id.clone(),
            })?;
        *slot = record.clone();

        tracing::debug!(id = %record.id, "Updated product");
        self.persist()?;
        Ok(record)
    }

    /// Remove the record with `id` and persist
    pub fn remove(&mut self, id: &str) -> InventoryResult<()> {
        self.items.retain(|p| p.id != id);
        tracing::debug!(id = %id, "Removed product");
        self.persist()
    }

    /// Remove every record whose id is in `ids` and persist.
    ///
    /// An empty set is a no-op and does not touch storage.
    pub fn bulk_remove(&mut self, ids: &HashSet<String>) -> InventoryResult<usize> {
        if ids.is_empty() {
            return Ok(0);
        }
        let before = self.items.len();
        self.items.retain(|p| !ids.contains(&p.id));
        let removed = before - self.items.len();

        tracing::debug!(requested = ids.len(), removed, "Bulk removed products");
        self.persist()?;
        Ok(removed)
    }

    /// Replace the whole collection and persist
    pub fn replace_all(&mut self, items: Vec<ProductRecord>) -> InventoryResult<()> {
        let mut seen = HashSet::new();
        if let Some(dup) = items.iter().find(|p| !seen.insert(p.id.as_str())) {
            return Err(EntityError::AlreadyExists { id: dup.id.clone() }.into());
        }
        self.items = items;
        self.persist()
    }

    fn persist(&mut self) -> InventoryResult<()> {
        if let Err(e) = self.adapter.write_all(&self.items) {
            tracing::warn!(error = %e, "Product write failed");
            self.set_error(WRITE_FAILED_MESSAGE);
            return Err(e);
        }
        Ok(())
    }

    // === View state ===

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.view.search = search.into();
    }

    pub fn set_category(&mut self, category: Option<Category>) {
        self.view.category = category;
    }

    pub fn set_sort(&mut self, sort: SortSpec) {
        self.view.sort = sort;
    }

    /// Apply a column-header click to the sort
    pub fn toggle_sort(&mut self, field: SortField) {
        self.view.sort = self.view.sort.toggle(field);
    }

    /// Set the current page; values below 1 become 1
    pub fn set_page(&mut self, page: usize) {
        self.view.page = page.max(1);
    }

    pub fn set_status(&mut self, status: LoadStatus) {
        self.status = status;
    }

    /// Enter the error status with `message`
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.status = LoadStatus::Error(message.into());
    }

    /// Run the query pipeline, clamping the current page if it fell out of range
    pub fn visible_page(&mut self) -> QueryOutcome {
        let outcome = query::run(&self.items, &self.view);
        if let Some(page) = outcome.corrected_page {
            tracing::debug!(from = self.view.page, to = page, "Clamped page");
            self.view.page = page;
        }
        outcome
    }
}
