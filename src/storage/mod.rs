//! The key-value storage adapter that persists users and record collections.
//!
//! Every value is a serialized string stored under a string key. Writes
//! overwrite whatever was there before (last writer wins); there is no
//! locking, transaction or conflict detection across sessions.

use async_trait::async_trait;
use thiserror::Error;

mod memory;
mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

/// Asynchronous get/set over string keys and serialized string values.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Get the value stored under `key`, or `None` if nothing has been stored.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any existing value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Errors that can occur while reading or writing the underlying store.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StorageError {
    /// The lock guarding the store was poisoned by a panicking thread.
    #[error("could not acquire the storage lock")]
    Lock,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    Sql(String),

    /// The store refused the operation because it is no longer available.
    ///
    /// Reserved for adapters backed by a store that can go away, such as a
    /// remote service. [MemoryStorage] and [SqliteStorage] never return it.
    #[error("the store is unavailable")]
    Unavailable,
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        StorageError::Sql(value.to_string())
    }
}

/// The key a user's account record is stored under.
pub fn user_key(email: &str) -> String {
    format!("user_{email}")
}

/// The key a user's collection is stored under, e.g. `transactions_<id>`.
pub fn collection_key(prefix: &str, user_id: &str) -> String {
    format!("{prefix}_{user_id}")
}

#[cfg(test)]
mod key_tests {
    use super::{collection_key, user_key};

    #[test]
    fn user_key_is_namespaced_by_email() {
        assert_eq!(user_key("foo@bar.baz"), "user_foo@bar.baz");
    }

    #[test]
    fn collection_key_is_namespaced_by_user_id() {
        assert_eq!(collection_key("transactions", "42"), "transactions_42");
        assert_eq!(collection_key("jobs", "42"), "jobs_42");
    }
}
