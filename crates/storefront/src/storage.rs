//! Durable key-value storage.
//!
//! The browser-storage analog: a small string-keyed store that survives
//! restarts. The cart and the theme preference each own one entry and are
//! written through on every mutation. Concurrent writers (two processes on
//! the same file) are last-writer-wins; there is no locking or versioning.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;

/// Storage entry keys.
pub mod keys {
    /// Serialized cart line items.
    pub const CART: &str = "smartcart_cart";
    /// Theme preference string.
    pub const THEME: &str = "smartcart_theme";
}

/// Errors raised by durable storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file could not be serialized.
    #[error("storage encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// String-keyed durable storage with write-through semantics.
///
/// Implementations must tolerate absent keys; corrupt values are the
/// caller's concern (readers degrade to defaults rather than erroring).
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be written durably.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// File-backed store: one JSON object mapping keys to string values.
///
/// The whole map is rewritten on every `set` (entries are tiny; the cart
/// document is the largest and stays well under a kilobyte per line item).
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`, creating parent directories as needed.
    ///
    /// A missing file starts empty. A corrupt file is logged and treated
    /// as empty rather than failing startup.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the parent directory cannot be
    /// created or an existing file cannot be read.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let entries = if path.exists() {
            let raw = std::fs::read_to_string(path)?;
            match serde_json::from_str::<HashMap<String, String>>(&raw) {
                Ok(map) => map,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Corrupt storage file, starting empty");
                    HashMap::new()
                }
            }
        } else {
            HashMap::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            entries: Mutex::new(entries),
        })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.insert(key.to_owned(), value.to_owned());
        let serialized = serde_json::to_string_pretty(&*entries)?;
        std::fs::write(&self.path, serialized)?;
        Ok(())
    }
}

/// In-memory store for tests.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with the given entries.
    #[must_use]
    pub fn with_entries(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            entries: Mutex::new(entries.into_iter().collect()),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("storage.json");

        {
            let store = FileStore::open(&path).expect("open store");
            store.set(keys::CART, "[]").expect("write cart");
            store.set(keys::THEME, "dark").expect("write theme");
        }

        let reopened = FileStore::open(&path).expect("reopen store");
        assert_eq!(reopened.get(keys::CART).expect("read"), Some("[]".to_owned()));
        assert_eq!(
            reopened.get(keys::THEME).expect("read"),
            Some("dark".to_owned())
        );
        assert_eq!(reopened.get("missing").expect("read"), None);
    }

    #[test]
    fn test_file_store_overwrites_not_appends() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("storage.json");

        let store = FileStore::open(&path).expect("open store");
        store.set(keys::THEME, "dark").expect("write");
        store.set(keys::THEME, "light").expect("overwrite");

        assert_eq!(store.get(keys::THEME).expect("read"), Some("light".to_owned()));
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "not json {{{").expect("write garbage");

        let store = FileStore::open(&path).expect("open survives corruption");
        assert_eq!(store.get(keys::CART).expect("read"), None);
    }

    #[test]
    fn test_open_creates_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested/deeper/storage.json");

        let store = FileStore::open(&path).expect("open store");
        store.set(keys::CART, "[]").expect("write");
        assert!(path.exists());
    }
}
