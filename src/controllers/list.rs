//! The product list view controller
//!
//! Owns the row selection and turns user actions into store calls. Deletes
//! run inside a `Loading` status window that is closed before returning.

use crate::controllers::navigation::Navigation;
use crate::controllers::query_string::{self, QueryParams};
use crate::core::entity::{Category, ProductRecord};
use crate::core::error::InventoryResult;
use crate::core::field::SortField;
use crate::core::query::{QueryOutcome, SortSpec};
use crate::core::store::{LoadStatus, ProductStore};
use indexmap::IndexSet;
use std::collections::HashSet;
use std::fmt;

/// A user-facing notice that did not reach the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    NothingSelected,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::NothingSelected => f.write_str("No items selected"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BulkDeleteOutcome {
    /// Number of records removed
    Deleted(usize),
    Rejected(Notice),
}

/// One rendered table page
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage {
    pub outcome: QueryOutcome,
    /// Checkbox state per row, aligned with `outcome.rows`
    pub selected: Vec<bool>,
    /// Header checkbox state
    pub all_selected: bool,
    pub sort: SortSpec,
}

/// What the list view shows
#[derive(Debug, Clone, PartialEq)]
pub enum ListScreen {
    /// Error panel with a retry action
    Error { message: String },
    Loading,
    /// The collection holds no products at all
    Empty,
    Table(ListPage),
}

#[derive(Debug, Clone, Default)]
pub struct ProductListController {
    selection: IndexSet<String>,
}

impl ProductListController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected ids, in the order they were checked
    pub fn selection(&self) -> &IndexSet<String> {
        &self.selection
    }

    /// Derive the screen for the current store state
    pub fn render(&self, store: &mut ProductStore) -> ListScreen {
        match store.status() {
            LoadStatus::Error(message) => {
                return ListScreen::Error {
                    message: message.clone(),
                };
            }
            LoadStatus::Loading => return ListScreen::Loading,
            LoadStatus::Idle => {}
        }
        if store.items().is_empty() {
            return ListScreen::Empty;
        }

        let outcome = store.visible_page();
        let selected = outcome
            .rows
            .iter()
            .map(|r| self.selection.contains(&r.id))
            .collect();
        let all_selected = self.is_all_selected(&outcome.rows);

        ListScreen::Table(ListPage {
            outcome,
            selected,
            all_selected,
            sort: store.view().sort,
        })
    }

    // === Selection ===

    pub fn toggle_row(&mut self, id: &str, checked: bool) {
        if checked {
            self.selection.insert(id.to_string());
        } else {
            self.selection.shift_remove(id);
        }
    }

    /// Select exactly the rows on the current page, or clear the selection
    pub fn toggle_select_all(&mut self, store: &mut ProductStore, checked: bool) {
        if checked {
            let outcome = store.visible_page();
            self.selection = outcome.row_ids().into_iter().map(String::from).collect();
        } else {
            self.selection.clear();
        }
    }

    /// True iff `rows` is non-empty and every row is selected
    pub fn is_all_selected(&self, rows: &[ProductRecord]) -> bool {
        !rows.is_empty() && rows.iter().all(|r| self.selection.contains(&r.id))
    }

    // === Deletes ===

    pub fn delete(&mut self, store: &mut ProductStore, id: &str) -> InventoryResult<()> {
        store.set_status(LoadStatus::Loading);
        store.remove(id)?;
        self.selection.shift_remove(id);
        store.set_status(LoadStatus::Idle);
        Ok(())
    }

    /// Delete every selected record; an empty selection never reaches the store
    pub fn bulk_delete(&mut self, store: &mut ProductStore) -> InventoryResult<BulkDeleteOutcome> {
        if self.selection.is_empty() {
            tracing::debug!("Bulk delete rejected: nothing selected");
            return Ok(BulkDeleteOutcome::Rejected(Notice::NothingSelected));
        }

        let ids: HashSet<String> = self.selection.drain(..).collect();
        store.set_status(LoadStatus::Loading);
        let removed = store.bulk_remove(&ids)?;
        store.set_status(LoadStatus::Idle);
        Ok(BulkDeleteOutcome::Deleted(removed))
    }

    /// Leave the error status
    pub fn retry(&self, store: &mut ProductStore) {
        store.set_status(LoadStatus::Idle);
    }

    // === Query controls ===

    /// Column header click
    pub fn sort_by(&self, store: &mut ProductStore, field: SortField) {
        store.toggle_sort(field);
    }

    pub fn search(&self, store: &mut ProductStore, text: &str) {
        store.set_search(text);
    }

    pub fn filter_category(&self, store: &mut ProductStore, category: Option<Category>) {
        store.set_category(category);
    }

    /// Selection is per page and is dropped when the page changes
    pub fn next_page(&mut self, store: &mut ProductStore) {
        let pagination = store.visible_page().pagination;
        if pagination.has_next {
            store.set_page(pagination.page + 1);
            self.selection.clear();
        }
    }

    pub fn prev_page(&mut self, store: &mut ProductStore) {
        let pagination = store.visible_page().pagination;
        if pagination.has_prev {
            store.set_page(pagination.page - 1);
            self.selection.clear();
        }
    }

    // === Navigation ===

    pub fn edit(&self, id: &str) -> Navigation {
        Navigation::EditForm(id.to_string())
    }

    pub fn add_product(&self) -> Navigation {
        Navigation::CreateForm
    }

    // === Query string ===

    pub fn query_params(&self, store: &ProductStore) -> QueryParams {
        query_string::to_query(store.view())
    }

    pub fn seed(&self, store: &mut ProductStore, params: &QueryParams) {
        query_string::apply_query(store, params);
    }
}
