//! The in-progress, possibly invalid record held by a form

use crate::core::entity::{Category, ProductRecord, final_price};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Editable fields of a draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DraftField {
    Name,
    Category,
    Description,
    ExpiryDate,
    CostPrice,
    SellPrice,
    Discount,
}

impl DraftField {
    pub const ALL: [DraftField; 7] = [
        DraftField::Name,
        DraftField::Category,
        DraftField::Description,
        DraftField::ExpiryDate,
        DraftField::CostPrice,
        DraftField::SellPrice,
        DraftField::Discount,
    ];

    /// Wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftField::Name => "name",
            DraftField::Category => "category",
            DraftField::Description => "description",
            DraftField::ExpiryDate => "expiryDate",
            DraftField::CostPrice => "costPrice",
            DraftField::SellPrice => "sellPrice",
            DraftField::Discount => "discount",
        }
    }

    /// Whether editing this field changes the derived final price
    pub fn affects_pricing(&self) -> bool {
        matches!(self, DraftField::SellPrice | DraftField::Discount)
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DraftField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DraftField::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| format!("unknown field '{}'", s))
    }
}

/// A product as typed into the form, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub category: Option<Category>,
    pub description: String,
    pub expiry_date: Option<NaiveDate>,
    pub cost_price: Option<f64>,
    pub sell_price: Option<f64>,
    pub discount: Option<f64>,
}

impl ProductDraft {
    /// Apply raw input text to one field.
    ///
    /// Text that does not parse leaves the field absent, so the validation
    /// rules report it instead of the parser.
    pub fn apply(&mut self, field: DraftField, raw: &str) {
        match field {
            DraftField::Name => self.name = raw.to_string(),
            DraftField::Description => self.description = raw.to_string(),
            DraftField::Category => self.category = raw.parse().ok(),
            DraftField::ExpiryDate => {
                self.expiry_date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
            }
            DraftField::CostPrice => self.cost_price = parse_number(raw),
            DraftField::SellPrice => self.sell_price = parse_number(raw),
            DraftField::Discount => self.discount = parse_number(raw),
        }
    }

    /// Derived final price; an absent discount counts as zero
    pub fn final_price(&self) -> Option<f64> {
        self.sell_price
            .map(|sell| final_price(sell, self.discount.unwrap_or(0.0)))
    }

    /// Build a record from this draft.
    ///
    /// Returns `None` if a required field is missing; callers validate first.
    pub fn to_record(&self, id: impl Into<String>) -> Option<ProductRecord> {
        let description = Some(self.description.clone()).filter(|d| !d.is_empty());
        Some(ProductRecord::new(
            id,
            self.name.clone(),
            self.category?,
            description,
            self.expiry_date,
            self.cost_price?,
            self.sell_price?,
            self.discount.unwrap_or(0.0),
        ))
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

impl From<&ProductRecord> for ProductDraft {
    fn from(record: &ProductRecord) -> Self {
        Self {
            name: record.name.clone(),
            category: Some(record.category),
            description: record.description.clone().unwrap_or_default(),
            expiry_date: record.expiry_date,
            cost_price: Some(record.cost_price),
            sell_price: Some(record.sell_price()),
            discount: Some(record.discount()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_parses_input_text() {
        let mut draft = ProductDraft::default();
        draft.apply(DraftField::Name, "Milk");
        draft.apply(DraftField::Category, "Dairy");
        draft.apply(DraftField::CostPrice, "10");
        draft.apply(DraftField::SellPrice, " 20.5 ");
        draft.apply(DraftField::ExpiryDate, "2030-02-01");

        assert_eq!(draft.name, "Milk");
        assert_eq!(draft.category, Some(Category::Dairy));
        assert_eq!(draft.cost_price, Some(10.0));
        assert_eq!(draft.sell_price, Some(20.5));
        assert_eq!(draft.expiry_date, NaiveDate::from_ymd_opt(2030, 2, 1));
    }

    #[test]
    fn test_unparsable_input_becomes_absent() {
        let mut draft = ProductDraft::default();
        draft.apply(DraftField::CostPrice, "ten");
        draft.apply(DraftField::Category, "Toys");
        draft.apply(DraftField::ExpiryDate, "tomorrow");
        draft.apply(DraftField::Discount, "");

        assert_eq!(draft.cost_price, None);
        assert_eq!(draft.category, None);
        assert_eq!(draft.expiry_date, None);
        assert_eq!(draft.discount, None);
    }

    #[test]
    fn test_final_price_tracks_inputs() {
        let mut draft = ProductDraft::default();
        assert_eq!(draft.final_price(), None);

        draft.apply(DraftField::SellPrice, "20");
        assert_eq!(draft.final_price(), Some(20.0));

        draft.apply(DraftField::Discount, "10");
        assert_eq!(draft.final_price(), Some(18.0));

        draft.apply(DraftField::SellPrice, "50");
        assert_eq!(draft.final_price(), Some(45.0));
    }

    #[test]
    fn test_record_draft_round_trip_keeps_fields() {
        let record = ProductRecord::new(
            "4",
            "Cheese",
            Category::Dairy,
            Some("aged".into()),
            None,
            5.0,
            9.0,
            0.0,
        );
        let draft = ProductDraft::from(&record);
        assert_eq!(draft.description, "aged");
        assert_eq!(draft.to_record("4"), Some(record));
    }

    #[test]
    fn test_to_record_requires_prices_and_category() {
        let mut draft = ProductDraft::default();
        draft.apply(DraftField::Name, "Milk");
        assert!(draft.to_record("1").is_none());
    }
}
