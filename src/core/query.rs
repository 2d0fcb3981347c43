//! View state and the filter → sort → paginate → aggregate pipeline
//!
//! Every function here is pure. The pipeline rescans the whole collection on
//! each call; no result is cached between calls.

use crate::core::entity::{Category, ProductRecord};
use crate::core::field::SortField;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default number of rows on one page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order '{}'", other)),
        }
    }
}

/// Sort column and direction; no column means insertion order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: Option<SortField>,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn by(field: SortField, order: SortOrder) -> Self {
        Self {
            field: Some(field),
            order,
        }
    }

    /// The sort after clicking a column header.
    ///
    /// Clicking the active ascending column flips it to descending; any other
    /// click sorts that column ascending.
    pub fn toggle(&self, field: SortField) -> Self {
        let order = if self.field == Some(field) && self.order == SortOrder::Asc {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        };
        Self::by(field, order)
    }
}

/// Transient query/display parameters, never persisted with the records
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub search: String,
    pub category: Option<Category>,
    pub sort: SortSpec,
    /// Current page (starts at 1)
    pub page: usize,
    pub page_size: usize,
}

impl ViewState {
    pub fn new(page_size: usize) -> Self {
        Self {
            search: String::new(),
            category: None,
            sort: SortSpec::default(),
            page: 1,
            page_size: page_size.max(1),
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub page_size: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata from calculation
    pub fn new(page: usize, page_size: usize, total: usize) -> Self {
        let page_size = page_size.max(1);
        let page = page.max(1);
        let total_pages = total.div_ceil(page_size);
        let start = (page - 1) * page_size;

        Self {
            page,
            page_size,
            total,
            total_pages,
            has_next: start + page_size < total,
            has_prev: page > 1,
        }
    }
}

/// Sums over the filtered set
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub cost: f64,
    pub sell: f64,
    pub final_price: f64,
}

/// Result of one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    /// Records on the presented page
    pub rows: Vec<ProductRecord>,
    /// Totals over every filtered record, not just `rows`
    pub totals: Totals,
    pub pagination: PaginationMeta,
    /// Set when the requested page was out of range and had to be clamped
    pub corrected_page: Option<usize>,
}

impl QueryOutcome {
    /// Ids of the presented rows, in display order
    pub fn row_ids(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.id.as_str()).collect()
    }
}

// ---------------------------------------------------------------------------
// Stages
// ---------------------------------------------------------------------------

/// Case-insensitive substring match on name or description
pub fn matches_search(record: &ProductRecord, needle_lower: &str) -> bool {
    needle_lower.is_empty()
        || record.name.to_lowercase().contains(needle_lower)
        || record.description_text().to_lowercase().contains(needle_lower)
}

/// Exact category match; no category passes everything
pub fn matches_category(record: &ProductRecord, category: Option<Category>) -> bool {
    category.is_none_or(|c| record.category == c)
}

pub fn filter_by_search<'a>(
    records: impl IntoIterator<Item = &'a ProductRecord>,
    search: &str,
) -> Vec<&'a ProductRecord> {
    let needle = search.to_lowercase();
    records
        .into_iter()
        .filter(|r| matches_search(r, &needle))
        .collect()
}

pub fn filter_by_category<'a>(
    records: impl IntoIterator<Item = &'a ProductRecord>,
    category: Option<Category>,
) -> Vec<&'a ProductRecord> {
    records
        .into_iter()
        .filter(|r| matches_category(r, category))
        .collect()
}

/// Stable sort; equal keys keep their prior relative order
pub fn sort_records(records: &mut [&ProductRecord], sort: SortSpec) {
    let Some(field) = sort.field else {
        return;
    };
    records.sort_by(|a, b| {
        let ordering = a.field_value(field).compare(&b.field_value(field));
        match sort.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

/// Page number clamped into `[1, max(1, total_pages)]`
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Slice `[(page-1)*page_size, page*page_size)`, empty when past the end
pub fn paginate<T: Clone>(records: &[T], page: usize, page_size: usize) -> Vec<T> {
    let page_size = page_size.max(1);
    let start = (page.max(1) - 1).saturating_mul(page_size);
    records
        .iter()
        .skip(start)
        .take(page_size)
        .cloned()
        .collect()
}

pub fn aggregate<'a>(records: impl IntoIterator<Item = &'a ProductRecord>) -> Totals {
    records.into_iter().fold(Totals::default(), |acc, r| Totals {
        cost: acc.cost + r.cost_price,
        sell: acc.sell + r.sell_price(),
        final_price: acc.final_price + r.final_price(),
    })
}

/// Records matching the view's search and category, sorted per the view
pub fn filtered<'a>(items: &'a [ProductRecord], view: &ViewState) -> Vec<&'a ProductRecord> {
    let searched = filter_by_search(items, &view.search);
    let mut result = filter_by_category(searched, view.category);
    sort_records(&mut result, view.sort);
    result
}

/// Run the whole pipeline for one view
pub fn run(items: &[ProductRecord], view: &ViewState) -> QueryOutcome {
    let result = filtered(items, view);
    let totals = aggregate(result.iter().copied());

    let total_pages = result.len().div_ceil(view.page_size.max(1));
    let page = clamp_page(view.page, total_pages);
    let corrected_page = (page != view.page).then_some(page);

    let rows = paginate(&result, page, view.page_size)
        .into_iter()
        .cloned()
        .collect();

    QueryOutcome {
        rows,
        totals,
        pagination: PaginationMeta::new(page, view.page_size, result.len()),
        corrected_page,
    }
}
