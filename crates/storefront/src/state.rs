//! Application state shared across handlers.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::cart::CartStore;
use crate::catalog::CatalogLoader;
use crate::config::StorefrontConfig;
use crate::notify::Notifier;
use crate::storage::{FileStore, KeyValueStore, StorageError};
use crate::theme::ThemeStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and owns every piece of
/// mutable application state explicitly: the catalog cache, the cart
/// store, the theme preference, and the notification queue. All mutation
/// goes through the owning component's methods.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogLoader,
    cart: Mutex<CartStore>,
    theme: Mutex<ThemeStore>,
    notifier: Arc<Notifier>,
}

impl AppState {
    /// Create the application state, opening the durable storage file at
    /// the configured path and restoring the persisted cart and theme.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage file cannot be opened.
    pub fn new(config: StorefrontConfig) -> Result<Self, StorageError> {
        let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&config.storage_path)?);
        Ok(Self::with_storage(config, storage))
    }

    /// Create the application state on top of an existing storage backend.
    ///
    /// Used by `new` and by tests that substitute an in-memory store.
    #[must_use]
    pub fn with_storage(config: StorefrontConfig, storage: Arc<dyn KeyValueStore>) -> Self {
        let notifier = Arc::new(Notifier::new());
        let catalog = CatalogLoader::new(config.catalog_url.clone());
        let cart = Mutex::new(CartStore::load(storage.clone(), notifier.clone()));
        let theme = Mutex::new(ThemeStore::load(storage));

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart,
                theme,
                notifier,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog loader.
    #[must_use]
    pub fn catalog(&self) -> &CatalogLoader {
        &self.inner.catalog
    }

    /// Lock the cart store. Handlers hold the guard only across the
    /// synchronous mutation, never across an await point.
    #[must_use]
    pub fn cart(&self) -> MutexGuard<'_, CartStore> {
        self.inner.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Lock the theme store.
    #[must_use]
    pub fn theme(&self) -> MutexGuard<'_, ThemeStore> {
        self.inner.theme.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get a reference to the notification emitter.
    #[must_use]
    pub fn notifier(&self) -> &Notifier {
        &self.inner.notifier
    }
}
