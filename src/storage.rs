//! Storage
//!
//! The durable key-value string store the cart and wishlist persist through.
//! The boundary is deliberately small: read, write, and remove of strings by
//! key, matching what a browser's local storage (or any device-scoped
//! profile store) offers.

use std::{fs, io, path::PathBuf};

use rustc_hash::FxHashMap;
use thiserror::Error;

/// Storage key the cart collection is persisted under.
pub const CART_KEY: &str = "wardrobe.cart";

/// Storage key the wishlist collection is persisted under.
pub const WISHLIST_KEY: &str = "wardrobe.wishlist";

/// Errors surfaced by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Wrapped I/O error from a file-backed store.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A durable key-value string store scoped to the user's device.
pub trait Storage {
    /// Read the value under `key`, or `None` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read at all.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the write does not reach the backend.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value under `key`; absent keys are a no-op.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the removal fails for a present key.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory storage. Never fails; state lives and dies with the value.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: FxHashMap<String, String>,
}

impl MemoryStorage {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), value.to_owned());

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);

        Ok(())
    }
}

/// File-backed storage: one file per key under a directory. The native
/// equivalent of a browser profile's local storage.
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (creating if necessary) a store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::write(self.path_for(key), value)?;

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
