//! # Stockroom
//!
//! The state container behind a product inventory screen: a product store with
//! view state, a filter → sort → paginate → aggregate query pipeline, draft
//! validation, and the form and list controllers that drive them.
//!
//! ## Features
//!
//! - **Single source of truth**: one [`ProductStore`](core::ProductStore) owns
//!   the records and the view state; every mutation persists the full list
//! - **Pure query pipeline**: search, category filter, stable sort, clamped
//!   pagination and totals over the filtered set
//! - **Derived pricing**: `finalPrice` is recomputed from sell price and
//!   discount and cannot be set directly
//! - **Pluggable storage**: a narrow key/value seam with in-memory and file
//!   backends
//! - **Configuration-Based**: page size, storage key and backend from YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stockroom::prelude::*;
//!
//! let mut store = InventoryConfig::default_config().open_store()?;
//!
//! let mut form = ProductFormController::create(store.clock());
//! form.set_field(DraftField::Name, "Milk");
//! form.set_field(DraftField::Category, "Dairy");
//! form.set_field(DraftField::CostPrice, "10");
//! form.set_field(DraftField::SellPrice, "20");
//! form.set_field(DraftField::Discount, "10");
//! form.submit();
//! let feedback = form.commit(&mut store)?;
//! assert_eq!(feedback.record.final_price(), 18.0);
//!
//! let list = ProductListController::new();
//! list.search(&mut store, "milk");
//! let screen = list.render(&mut store);
//! ```

pub mod config;
pub mod controllers;
pub mod core;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        clock::{Clock, FixedClock, SystemClock},
        draft::{DraftField, ProductDraft},
        entity::{Category, ProductRecord},
        error::{InventoryError, InventoryResult, Recovery},
        field::{FieldValue, SortField},
        query::{QueryOutcome, SortOrder, SortSpec, Totals, ViewState},
        store::{LoadStatus, ProductStore},
        validation::ValidationReport,
    };

    // === Controllers ===
    pub use crate::controllers::{
        BulkDeleteOutcome, FormEntry, FormMode, ListPage, ListScreen, Navigation, Notice,
        ProductFormController, ProductListController, QueryParams, SubmitFeedback,
        SubmitOutcome,
    };

    // === Storage ===
    pub use crate::storage::{
        BlobAdapter, FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore, PersistenceAdapter,
    };

    // === Config ===
    pub use crate::config::{InventoryConfig, StorageConfig};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use chrono::NaiveDate;
}
