//! Catalog filtering and search.
//!
//! Pure derivations over the loaded catalog: a category selector (with an
//! `"all"` sentinel), a free-text search over name/description/category,
//! and the list of selectable category options. Catalog order is always
//! preserved.

use crate::types::product::Product;

/// Sentinel category selector meaning "no category restriction".
pub const ALL_CATEGORIES: &str = "all";

/// Category restriction applied to the product listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategorySelector {
    /// No restriction (the `"all"` option).
    #[default]
    All,
    /// Only products whose category matches, case-insensitively.
    Category(String),
}

impl CategorySelector {
    /// Parse a selector from a raw query value. The `"all"` sentinel (in
    /// any casing) and the empty string mean no restriction.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_CATEGORIES) {
            Self::All
        } else {
            Self::Category(trimmed.to_owned())
        }
    }

    /// The raw value this selector renders as in a category dropdown.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Category(name) => name,
        }
    }

    fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Category(name) => product.category.eq_ignore_ascii_case(name),
        }
    }
}

/// Filter `products` by category selector and free-text search.
///
/// The category and text filters compose with logical AND. A non-empty
/// search term matches when its lowercase form is a substring of the
/// lowercased name, description, or category. Catalog order is preserved.
#[must_use]
pub fn filter_products<'a>(
    products: &'a [Product],
    selector: &CategorySelector,
    search: &str,
) -> Vec<&'a Product> {
    let term = search.trim().to_lowercase();

    products
        .iter()
        .filter(|p| selector.matches(p))
        .filter(|p| {
            term.is_empty()
                || p.name.to_lowercase().contains(&term)
                || p.description.to_lowercase().contains(&term)
                || p.category.to_lowercase().contains(&term)
        })
        .collect()
}

/// Distinct categories present in the catalog, in first-seen order,
/// prefixed with the `"all"` sentinel option.
#[must_use]
pub fn category_options(products: &[Product]) -> Vec<String> {
    let mut options = vec![ALL_CATEGORIES.to_owned()];

    for product in products {
        if !options
            .iter()
            .skip(1)
            .any(|seen| seen == &product.category)
        {
            options.push(product.category.clone());
        }
    }

    options
}
