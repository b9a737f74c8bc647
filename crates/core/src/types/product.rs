//! Product catalog records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// Category assigned to products whose catalog record carries none.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// A purchasable product from the catalog.
///
/// Products are immutable once loaded; everything downstream (cart line
/// items, filtered listings) copies or borrows them but never mutates.
/// Catalog JSON carries `price` as a plain number, so it is bridged to
/// [`Decimal`] through the float serde adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier, the cart's deduplication key.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price in the store currency. Non-negative by convention;
    /// the catalog is trusted input.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Image path or URL.
    pub image: String,
    /// Product category. Absent in some catalog records.
    #[serde(default = "default_category")]
    pub category: String,
    /// Free-text description.
    pub description: String,
    /// Star rating, 0-5 expected but not validated.
    pub rating: f32,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_owned()
}
