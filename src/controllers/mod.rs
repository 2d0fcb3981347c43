//! UI-facing controllers and boundary adapters
//!
//! Controllers hold transient UI state (a form draft, a row selection) and
//! dispatch to the [`ProductStore`](crate::core::ProductStore). They never
//! render or route: navigation is returned as a [`Navigation`] outcome and
//! query-string sync goes through [`query_string`].

pub mod form;
pub mod list;
pub mod navigation;
pub mod query_string;

pub use form::{FormEntry, FormMode, ProductFormController, SubmitFeedback, SubmitOutcome};
pub use list::{BulkDeleteOutcome, ListPage, ListScreen, Notice, ProductListController};
pub use navigation::Navigation;
pub use query_string::QueryParams;
