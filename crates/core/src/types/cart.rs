//! Shopping cart data model and invariant-preserving operations.
//!
//! The cart holds at most one line item per product id; adding an already
//! carted product increments its quantity instead of inserting a second
//! line. Quantities are always at least 1 while an item exists - any
//! transition to zero or below removes the line item entirely.
//!
//! Persistence and notifications are the storefront's concern; this module
//! is pure state.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::product::Product;

/// A cart entry: a copy of the product's fields at the time of first add,
/// plus the desired quantity.
///
/// The product fields are flattened so the serialized form is a single flat
/// object, which is also the shape persisted to durable storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    #[serde(flatten)]
    pub product: Product,
    /// Desired quantity, always >= 1.
    pub quantity: u32,
}

impl CartLineItem {
    /// The product id this line item is keyed on.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }
}

/// Result of [`Cart::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line item was inserted with quantity 1.
    Inserted,
    /// An existing line item's quantity was incremented to the given value.
    Incremented(u32),
}

/// Result of [`Cart::remove`].
#[derive(Debug, Clone, PartialEq)]
pub enum RemoveOutcome {
    /// The line item was removed from the cart.
    Removed(CartLineItem),
    /// No line item with that product id existed.
    NotFound,
}

/// Result of [`Cart::change_quantity`].
#[derive(Debug, Clone, PartialEq)]
pub enum QuantityChange {
    /// The quantity was adjusted to the given value (still >= 1).
    Updated(u32),
    /// The adjustment brought the quantity to zero or below, so the line
    /// item was removed.
    Removed(CartLineItem),
    /// No line item with that product id existed.
    NotFound,
}

/// An ordered collection of cart line items.
///
/// Order is insertion order and only meaningful for display. Serializes
/// transparently as an array of line items, which is the storage format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Read-only view of the line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Whether the cart holds no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across all line items (drives the badge).
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Add one unit of `product` to the cart.
    ///
    /// If a line item for the product already exists its quantity is
    /// incremented; otherwise a new line item with quantity 1 is appended.
    pub fn add(&mut self, product: &Product) -> AddOutcome {
        if let Some(item) = self.items.iter_mut().find(|i| i.id() == product.id) {
            item.quantity = item.quantity.saturating_add(1);
            return AddOutcome::Incremented(item.quantity);
        }

        self.items.push(CartLineItem {
            product: product.clone(),
            quantity: 1,
        });
        AddOutcome::Inserted
    }

    /// Remove the line item for `id`, if any.
    pub fn remove(&mut self, id: ProductId) -> RemoveOutcome {
        match self.items.iter().position(|item| item.id() == id) {
            Some(pos) => RemoveOutcome::Removed(self.items.remove(pos)),
            None => RemoveOutcome::NotFound,
        }
    }

    /// Adjust the quantity of the line item for `id` by `delta`.
    ///
    /// A resulting quantity of zero or below removes the line item instead
    /// of persisting a non-positive quantity.
    pub fn change_quantity(&mut self, id: ProductId, delta: i64) -> QuantityChange {
        let Some(item) = self.items.iter_mut().find(|item| item.id() == id) else {
            return QuantityChange::NotFound;
        };

        // Deltas come straight from request forms; saturate rather than
        // trust them to stay in range.
        let new_quantity = i64::from(item.quantity).saturating_add(delta);
        if new_quantity <= 0 {
            return match self.remove(id) {
                RemoveOutcome::Removed(item) => QuantityChange::Removed(item),
                RemoveOutcome::NotFound => QuantityChange::NotFound,
            };
        }

        // Positive but possibly above u32::MAX; saturate instead of truncating.
        item.quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
        QuantityChange::Updated(item.quantity)
    }
}
