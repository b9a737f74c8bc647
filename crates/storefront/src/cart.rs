//! Cart store: cart state plus write-through persistence and notifications.
//!
//! Wraps the core [`Cart`] with the durable key-value store and the
//! notification emitter. Every mutation overwrites the stored cart
//! document in full - no batching, no append - and emits a transient
//! user-facing message describing the outcome.

use std::sync::Arc;

use smartcart_core::{AddOutcome, Cart, CartLineItem, Product, ProductId, QuantityChange, RemoveOutcome};

use crate::notify::{Notifier, Severity};
use crate::storage::{KeyValueStore, StorageError, keys};

/// Owns the cart and mediates all mutations.
///
/// Other components read the cart or call these mutators; nothing else
/// touches the collection directly.
pub struct CartStore {
    cart: Cart,
    storage: Arc<dyn KeyValueStore>,
    notifier: Arc<Notifier>,
}

impl CartStore {
    /// Initialize the store by deserializing the cart from durable storage.
    ///
    /// An absent or corrupt stored value degrades to an empty cart; neither
    /// is fatal.
    pub fn load(storage: Arc<dyn KeyValueStore>, notifier: Arc<Notifier>) -> Self {
        let cart = match storage.get(keys::CART) {
            Ok(Some(raw)) => match serde_json::from_str::<Cart>(&raw) {
                Ok(cart) => cart,
                Err(e) => {
                    tracing::warn!(error = %e, "Corrupt stored cart, starting empty");
                    Cart::new()
                }
            },
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read stored cart, starting empty");
                Cart::new()
            }
        };

        Self {
            cart,
            storage,
            notifier,
        }
    }

    /// Read-only view of the cart line items.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        self.cart.items()
    }

    /// The cart itself, for totals computation.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Sum of quantities, driving the badge views.
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.cart.total_item_count()
    }

    /// Add one unit of the product with `id` to the cart.
    ///
    /// An id not present in `catalog` emits an error notification and
    /// performs no mutation. Otherwise the cart is mutated, persisted, and
    /// a success notification is emitted.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the mutated cart cannot be persisted.
    pub fn add_item(&mut self, catalog: &[Product], id: ProductId) -> Result<(), StorageError> {
        let Some(product) = catalog.iter().find(|p| p.id == id) else {
            tracing::debug!(%id, "Add to cart for unknown product");
            self.notifier.notify("Product not found!", Severity::Error);
            return Ok(());
        };

        match self.cart.add(product) {
            AddOutcome::Inserted => {
                tracing::info!(%id, name = %product.name, "Line item added");
            }
            AddOutcome::Incremented(quantity) => {
                tracing::info!(%id, name = %product.name, quantity, "Line item incremented");
            }
        }

        self.persist()?;
        self.notifier
            .notify(format!("{} added to cart!", product.name), Severity::Success);
        Ok(())
    }

    /// Remove the line item for `id`, if any.
    ///
    /// A miss emits a distinct "not in cart" message rather than claiming a
    /// removal happened. The stored cart is rewritten either way.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be persisted.
    pub fn remove_item(&mut self, id: ProductId) -> Result<(), StorageError> {
        let outcome = self.cart.remove(id);
        self.persist()?;

        match outcome {
            RemoveOutcome::Removed(item) => {
                tracing::info!(%id, name = %item.product.name, "Line item removed");
                self.notifier.notify(
                    format!("{} removed from cart.", item.product.name),
                    Severity::Error,
                );
            }
            RemoveOutcome::NotFound => {
                tracing::debug!(%id, "Remove for product not in cart");
                self.notifier.notify("Item not in cart.", Severity::Error);
            }
        }
        Ok(())
    }

    /// Adjust the quantity of the line item for `id` by `delta`.
    ///
    /// A resulting quantity of zero or below removes the item with the
    /// usual removal notification. An id not in the cart is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be persisted.
    pub fn change_quantity(&mut self, id: ProductId, delta: i64) -> Result<(), StorageError> {
        match self.cart.change_quantity(id, delta) {
            QuantityChange::Updated(quantity) => {
                tracing::info!(%id, quantity, "Line item quantity changed");
                self.persist()
            }
            QuantityChange::Removed(item) => {
                self.persist()?;
                tracing::info!(%id, name = %item.product.name, "Line item removed via quantity change");
                self.notifier.notify(
                    format!("{} removed from cart.", item.product.name),
                    Severity::Error,
                );
                Ok(())
            }
            QuantityChange::NotFound => Ok(()),
        }
    }

    /// Serialize and overwrite the stored cart document.
    fn persist(&self) -> Result<(), StorageError> {
        let serialized = serde_json::to_string(&self.cart)?;
        self.storage.set(keys::CART, &serialized)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::storage::MemoryStore;

    use super::*;

    fn catalog() -> Vec<Product> {
        vec![
            Product {
                id: ProductId::new(1),
                name: "Laptop".to_owned(),
                price: Decimal::new(500, 0),
                image: "images/laptop.webp".to_owned(),
                category: "Electronics".to_owned(),
                description: "A laptop.".to_owned(),
                rating: 4.5,
            },
            Product {
                id: ProductId::new(2),
                name: "Watch".to_owned(),
                price: Decimal::new(50, 0),
                image: "images/watch.webp".to_owned(),
                category: "Wearables".to_owned(),
                description: "A watch.".to_owned(),
                rating: 4.0,
            },
        ]
    }

    fn store() -> (CartStore, Arc<MemoryStore>, Arc<Notifier>) {
        let storage = Arc::new(MemoryStore::new());
        let notifier = Arc::new(Notifier::new());
        let cart = CartStore::load(storage.clone(), notifier.clone());
        (cart, storage, notifier)
    }

    #[test]
    fn test_add_known_product_persists_and_notifies() {
        let (mut cart, storage, notifier) = store();

        cart.add_item(&catalog(), ProductId::new(1)).expect("add");

        assert_eq!(cart.total_item_count(), 1);
        let stored = storage.get(keys::CART).expect("read").expect("present");
        let restored: Cart = serde_json::from_str(&stored).expect("parse stored cart");
        assert_eq!(restored, *cart.cart());

        let pending = notifier.drain();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].message, "Laptop added to cart!");
        assert_eq!(pending[0].severity, Severity::Success);
    }

    #[test]
    fn test_add_unknown_product_is_pure_notification() {
        let (mut cart, storage, notifier) = store();

        cart.add_item(&catalog(), ProductId::new(999)).expect("add");

        assert!(cart.items().is_empty());
        assert_eq!(storage.get(keys::CART).expect("read"), None);

        let pending = notifier.drain();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].message, "Product not found!");
        assert_eq!(pending[0].severity, Severity::Error);
    }

    #[test]
    fn test_every_mutation_writes_through() {
        let (mut cart, storage, _notifier) = store();
        let catalog = catalog();

        cart.add_item(&catalog, ProductId::new(1)).expect("add");
        cart.add_item(&catalog, ProductId::new(2)).expect("add");
        cart.change_quantity(ProductId::new(2), 3).expect("adjust");
        cart.remove_item(ProductId::new(1)).expect("remove");

        let stored = storage.get(keys::CART).expect("read").expect("present");
        let restored: Cart = serde_json::from_str(&stored).expect("parse stored cart");
        assert_eq!(restored.total_item_count(), 4);
        assert_eq!(restored.items().len(), 1);
        assert_eq!(restored.items()[0].id(), ProductId::new(2));
    }

    #[test]
    fn test_remove_hit_and_miss_notify_differently() {
        let (mut cart, _storage, notifier) = store();
        cart.add_item(&catalog(), ProductId::new(2)).expect("add");
        let _ = notifier.drain();

        cart.remove_item(ProductId::new(2)).expect("remove");
        cart.remove_item(ProductId::new(2)).expect("remove again");

        let pending = notifier.drain();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].message, "Watch removed from cart.");
        assert_eq!(pending[1].message, "Item not in cart.");
        assert!(pending.iter().all(|n| n.severity == Severity::Error));
    }

    #[test]
    fn test_quantity_drop_to_zero_removes_and_notifies() {
        let (mut cart, _storage, notifier) = store();
        cart.add_item(&catalog(), ProductId::new(1)).expect("add");
        let _ = notifier.drain();

        cart.change_quantity(ProductId::new(1), -1).expect("adjust");

        assert!(cart.items().is_empty());
        let pending = notifier.drain();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].message, "Laptop removed from cart.");
    }

    #[test]
    fn test_change_quantity_for_missing_item_is_silent_noop() {
        let (mut cart, storage, notifier) = store();

        cart.change_quantity(ProductId::new(1), 1).expect("adjust");

        assert!(cart.items().is_empty());
        assert_eq!(storage.get(keys::CART).expect("read"), None);
        assert!(notifier.drain().is_empty());
    }

    #[test]
    fn test_load_recovers_from_corrupt_stored_cart() {
        let storage = Arc::new(MemoryStore::with_entries([(
            keys::CART.to_owned(),
            "not a cart".to_owned(),
        )]));
        let cart = CartStore::load(storage, Arc::new(Notifier::new()));

        assert!(cart.items().is_empty());
    }

    #[test]
    fn test_load_restores_persisted_cart() {
        let storage: Arc<MemoryStore> = Arc::new(MemoryStore::new());
        let notifier = Arc::new(Notifier::new());

        {
            let mut cart = CartStore::load(storage.clone(), notifier.clone());
            cart.add_item(&catalog(), ProductId::new(1)).expect("add");
            cart.add_item(&catalog(), ProductId::new(1)).expect("add");
        }

        let reloaded = CartStore::load(storage, notifier);
        assert_eq!(reloaded.total_item_count(), 2);
        assert_eq!(reloaded.items()[0].id(), ProductId::new(1));
    }
}
