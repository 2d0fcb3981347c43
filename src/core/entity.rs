//! Product records and the fixed category set

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// The enumerated product categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Dairy,
    Bakery,
    Beverages,
    Produce,
    Meat,
    Frozen,
    Snacks,
    Household,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 8] = [
        Category::Dairy,
        Category::Bakery,
        Category::Beverages,
        Category::Produce,
        Category::Meat,
        Category::Frozen,
        Category::Snacks,
        Category::Household,
    ];

    /// Display name, also used as the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Dairy => "Dairy",
            Category::Bakery => "Bakery",
            Category::Beverages => "Beverages",
            Category::Produce => "Produce",
            Category::Meat => "Meat",
            Category::Frozen => "Frozen",
            Category::Snacks => "Snacks",
            Category::Household => "Household",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when text does not name a category
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Price after discount: `sell - sell * discount / 100`
pub fn final_price(sell_price: f64, discount: f64) -> f64 {
    sell_price - sell_price * discount / 100.0
}

/// One product entry in the collection.
///
/// `final_price` is derived from `sell_price` and `discount`; it is only
/// written by the constructor and [`ProductRecord::set_pricing`], and it is
/// recomputed when a record is read back from storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "StoredProduct")]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    pub cost_price: f64,
    sell_price: f64,
    discount: f64,
    final_price: f64,
}

impl ProductRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: Category,
        description: Option<String>,
        expiry_date: Option<NaiveDate>,
        cost_price: f64,
        sell_price: f64,
        discount: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            description,
            expiry_date,
            cost_price,
            sell_price,
            discount,
            final_price: final_price(sell_price, discount),
        }
    }

    pub fn sell_price(&self) -> f64 {
        self.sell_price
    }

    pub fn discount(&self) -> f64 {
        self.discount
    }

    pub fn final_price(&self) -> f64 {
        self.final_price
    }

    /// Replace sell price and discount, recomputing the final price
    pub fn set_pricing(&mut self, sell_price: f64, discount: f64) {
        self.sell_price = sell_price;
        self.discount = discount;
        self.final_price = final_price(sell_price, discount);
    }

    /// Description text, empty when absent
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// The id as a number, if it is one
    pub fn numeric_id(&self) -> Option<u64> {
        self.id.trim().parse().ok()
    }
}

// ---------------------------------------------------------------------------
// Lenient read side
// ---------------------------------------------------------------------------

/// Shape of a record as found in a persisted blob.
///
/// Blobs written by a form hold numbers as strings and absent optionals as
/// empty strings; both are accepted here.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredProduct {
    #[serde(deserialize_with = "id_text")]
    id: String,
    name: String,
    category: String,
    #[serde(default, deserialize_with = "optional_text")]
    description: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    expiry_date: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    cost_price: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    sell_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    discount: Option<f64>,
}

impl TryFrom<StoredProduct> for ProductRecord {
    type Error = String;

    fn try_from(raw: StoredProduct) -> Result<Self, Self::Error> {
        let category = raw.category.parse::<Category>().map_err(|e| e.to_string())?;
        let expiry_date = raw
            .expiry_date
            .map(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d"))
            .transpose()
            .map_err(|e| format!("invalid expiryDate: {}", e))?;
        let cost_price = raw.cost_price.ok_or("costPrice is missing")?;
        let sell_price = raw.sell_price.ok_or("sellPrice is missing")?;

        Ok(ProductRecord::new(
            raw.id,
            raw.name,
            category,
            raw.description,
            expiry_date,
            cost_price,
            sell_price,
            raw.discount.unwrap_or(0.0),
        ))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(f64),
}

fn id_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match TextOrNumber::deserialize(deserializer)? {
        TextOrNumber::Text(s) => s,
        TextOrNumber::Number(n) => format!("{}", n),
    })
}

fn optional_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value: Option<TextOrNumber> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(TextOrNumber::Number(n)) => Some(n),
        Some(TextOrNumber::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}
