//! Sortable field values and the set of sortable columns

use crate::core::entity::ProductRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A polymorphic field value used as a sort key
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Null,
}

impl FieldValue {
    /// Total ordering between two sort keys.
    ///
    /// Null sorts before any value. Values of the same kind compare by their
    /// natural ordering; mixed kinds never occur for a single column and are
    /// treated as equal.
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Null, FieldValue::Null) => Ordering::Equal,
            (FieldValue::Null, _) => Ordering::Less,
            (_, FieldValue::Null) => Ordering::Greater,
            (FieldValue::Number(a), FieldValue::Number(b)) => a.total_cmp(b),
            (FieldValue::Date(a), FieldValue::Date(b)) => a.cmp(b),
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// Columns a list can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Name,
    Category,
    ExpiryDate,
    CostPrice,
    SellPrice,
    Discount,
    FinalPrice,
}

impl SortField {
    /// Every sortable column, in table order
    pub const ALL: [SortField; 7] = [
        SortField::Name,
        SortField::Category,
        SortField::ExpiryDate,
        SortField::CostPrice,
        SortField::SellPrice,
        SortField::Discount,
        SortField::FinalPrice,
    ];

    /// Wire name, as used in query strings
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Category => "category",
            SortField::ExpiryDate => "expiryDate",
            SortField::CostPrice => "costPrice",
            SortField::SellPrice => "sellPrice",
            SortField::Discount => "discount",
            SortField::FinalPrice => "finalPrice",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortField::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| format!("unknown sort field '{}'", s))
    }
}

impl ProductRecord {
    /// Sort key for a column
    pub fn field_value(&self, field: SortField) -> FieldValue {
        match field {
            SortField::Name => FieldValue::Text(self.name.clone()),
            SortField::Category => FieldValue::Text(self.category.as_str().to_string()),
            SortField::ExpiryDate => self
                .expiry_date
                .map(FieldValue::Date)
                .unwrap_or(FieldValue::Null),
            SortField::CostPrice => FieldValue::Number(self.cost_price),
            SortField::SellPrice => FieldValue::Number(self.sell_price()),
            SortField::Discount => FieldValue::Number(self.discount()),
            SortField::FinalPrice => FieldValue::Number(self.final_price()),
        }
    }
}
