//! Core module: product records, the query pipeline, the store and validation

pub mod clock;
pub mod draft;
pub mod entity;
pub mod error;
pub mod field;
pub mod query;
pub mod store;
pub mod validation;

pub use clock::{Clock, FixedClock, SystemClock};
pub use draft::{DraftField, ProductDraft};
pub use entity::{Category, ProductRecord};
pub use error::{InventoryError, InventoryResult};
pub use field::{FieldValue, SortField};
pub use query::{QueryOutcome, SortOrder, SortSpec, ViewState};
pub use store::{LoadStatus, ProductStore};
pub use validation::ValidationReport;
