//! An in-process storage adapter backed by a hash map.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;

use super::{Storage, StorageError};

/// Stores values in memory for the lifetime of the process.
///
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of keys currently stored.
    ///
    /// # Errors
    ///
    /// Returns [StorageError::Lock] if the lock is poisoned.
    pub fn len(&self) -> Result<usize, StorageError> {
        self.values
            .lock()
            .map(|values| values.len())
            .map_err(|_| StorageError::Lock)
    }

    /// Whether nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns [StorageError::Lock] if the lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, StorageError> {
        self.len().map(|len| len == 0)
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.values.lock().map_err(|_| StorageError::Lock)?;

        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.values.lock().map_err(|_| StorageError::Lock)?;
        values.insert(key.to_owned(), value.to_owned());

        Ok(())
    }
}
