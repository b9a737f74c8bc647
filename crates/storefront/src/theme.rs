//! Theme preference store.
//!
//! Independent of the cart but persisted through the same key-value
//! storage: read once at startup, written on every toggle.

use std::sync::Arc;

use smartcart_core::Theme;

use crate::storage::{KeyValueStore, StorageError, keys};

/// Owns the current theme preference.
pub struct ThemeStore {
    current: Theme,
    storage: Arc<dyn KeyValueStore>,
}

impl ThemeStore {
    /// Initialize from durable storage; an absent or unrecognized value
    /// degrades to the default theme.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let current = match storage.get(keys::THEME) {
            Ok(Some(raw)) => Theme::from_stored(&raw),
            Ok(None) => Theme::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read stored theme, using default");
                Theme::default()
            }
        };

        Self { current, storage }
    }

    /// The active theme.
    #[must_use]
    pub const fn current(&self) -> Theme {
        self.current
    }

    /// Flip the theme and persist the new preference.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the preference cannot be written.
    pub fn toggle(&mut self) -> Result<Theme, StorageError> {
        self.current = self.current.toggled();
        self.storage.set(keys::THEME, self.current.as_str())?;
        tracing::info!(theme = self.current.as_str(), "Theme toggled");
        Ok(self.current)
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::MemoryStore;

    use super::*;

    #[test]
    fn test_defaults_to_light_when_unset() {
        let store = ThemeStore::load(Arc::new(MemoryStore::new()));
        assert_eq!(store.current(), Theme::Light);
    }

    #[test]
    fn test_toggle_persists_and_survives_reload() {
        let storage: Arc<MemoryStore> = Arc::new(MemoryStore::new());

        let mut store = ThemeStore::load(storage.clone());
        assert_eq!(store.toggle().expect("toggle"), Theme::Dark);

        let reloaded = ThemeStore::load(storage);
        assert_eq!(reloaded.current(), Theme::Dark);
    }

    #[test]
    fn test_unrecognized_stored_value_degrades_to_default() {
        let storage = Arc::new(MemoryStore::with_entries([(
            keys::THEME.to_owned(),
            "sepia".to_owned(),
        )]));
        let store = ThemeStore::load(storage);
        assert_eq!(store.current(), Theme::default());
    }
}
