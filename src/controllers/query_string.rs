//! Two-way mapping between the list view state and a flat query map
//!
//! Keys: `search`, `category`, `sortField`, `sortOrder`, `page`. The store
//! knows nothing about this mapping; the list view owns it.

use crate::core::entity::Category;
use crate::core::field::SortField;
use crate::core::query::{SortOrder, SortSpec, ViewState};
use crate::core::store::ProductStore;
use indexmap::IndexMap;

pub const SEARCH: &str = "search";
pub const CATEGORY: &str = "category";
pub const SORT_FIELD: &str = "sortField";
pub const SORT_ORDER: &str = "sortOrder";
pub const PAGE: &str = "page";

/// Flat, ordered, string-keyed query representation
pub type QueryParams = IndexMap<String, String>;

/// Mirror a view state into query parameters.
///
/// Empty search and unset category/sort are omitted; `page` is always present.
pub fn to_query(view: &ViewState) -> QueryParams {
    let mut params = QueryParams::new();
    if !view.search.is_empty() {
        params.insert(SEARCH.to_string(), view.search.clone());
    }
    if let Some(category) = view.category {
        params.insert(CATEGORY.to_string(), category.as_str().to_string());
    }
    if let Some(field) = view.sort.field {
        params.insert(SORT_FIELD.to_string(), field.as_str().to_string());
        params.insert(SORT_ORDER.to_string(), view.sort.order.as_str().to_string());
    }
    params.insert(PAGE.to_string(), view.page.to_string());
    params
}

/// Seed the store's view state from whichever keys are present.
///
/// Values that do not parse are skipped. A `sortField` without a valid
/// `sortOrder` sorts ascending.
pub fn apply_query(store: &mut ProductStore, params: &QueryParams) {
    if let Some(search) = params.get(SEARCH).filter(|s| !s.is_empty()) {
        store.set_search(search.clone());
    }

    if let Some(raw) = params.get(CATEGORY).filter(|s| !s.is_empty()) {
        match raw.parse::<Category>() {
            Ok(category) => store.set_category(Some(category)),
            Err(e) => tracing::debug!(error = %e, "Ignoring category query parameter"),
        }
    }

    if let Some(raw) = params.get(SORT_FIELD).filter(|s| !s.is_empty()) {
        match raw.parse::<SortField>() {
            Ok(field) => {
                let order = params
                    .get(SORT_ORDER)
                    .and_then(|o| o.parse::<SortOrder>().ok())
                    .unwrap_or_default();
                store.set_sort(SortSpec::by(field, order));
            }
            Err(e) => tracing::debug!(error = %e, "Ignoring sortField query parameter"),
        }
    }

    if let Some(raw) = params.get(PAGE) {
        match raw.trim().parse::<usize>() {
            Ok(page) => store.set_page(page),
            Err(e) => tracing::debug!(value = %raw, error = %e, "Ignoring page query parameter"),
        }
    }
}
