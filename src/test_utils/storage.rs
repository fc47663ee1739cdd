//! Storage doubles for observing and failing writes in tests.

use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use async_trait::async_trait;

use crate::storage::{MemoryStorage, Storage, StorageError};

/// A [MemoryStorage] that counts calls and can be told to reject writes.
#[derive(Debug, Clone, Default)]
pub(crate) struct CountingStorage {
    inner: MemoryStorage,
    get_count: Arc<AtomicUsize>,
    set_count: Arc<AtomicUsize>,
    fail_writes: Arc<AtomicBool>,
}

impl CountingStorage {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn get_count(&self) -> usize {
        self.get_count.load(Ordering::SeqCst)
    }

    /// The number of successful writes.
    pub(crate) fn set_count(&self) -> usize {
        self.set_count.load(Ordering::SeqCst)
    }

    /// Make every following `set` fail with [StorageError::Unavailable].
    pub(crate) fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl Storage for CountingStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.get_count.fetch_add(1, Ordering::SeqCst);
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable);
        }

        self.inner.set(key, value).await?;
        self.set_count.fetch_add(1, Ordering::SeqCst);

        Ok(())
    }
}
