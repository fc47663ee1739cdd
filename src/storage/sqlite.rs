//! A storage adapter that keeps key-value pairs in a SQLite database.
use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension};

use super::{Storage, StorageError};

/// Stores values in a single SQLite table.
///
/// Clones share the same connection.
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteStorage {
    /// Wrap an existing connection, creating the key-value table if needed.
    ///
    /// # Errors
    ///
    /// Returns [StorageError::Sql] if the table could not be created.
    pub fn new(connection: Connection) -> Result<Self, StorageError> {
        create_key_value_table(&connection)?;

        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Open (or create) the database file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [StorageError::Sql] if the file could not be opened or initialized.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        Self::new(Connection::open(path)?)
    }

    /// Create a store that only lives for as long as this handle (and its clones).
    ///
    /// # Errors
    ///
    /// Returns [StorageError::Sql] if the database could not be initialized.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::new(Connection::open_in_memory()?)
    }
}

fn create_key_value_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS key_value (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let connection = self.connection.lock().map_err(|_| StorageError::Lock)?;

        connection
            .query_row(
                "SELECT value FROM key_value WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()
            .map_err(StorageError::from)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let connection = self.connection.lock().map_err(|_| StorageError::Lock)?;

        connection.execute(
            "INSERT INTO key_value (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            (key, value),
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod sqlite_storage_tests {
    use rusqlite::Connection;

    use crate::storage::{SqliteStorage, Storage};

    fn get_storage() -> SqliteStorage {
        SqliteStorage::open_in_memory().unwrap()
    }

    #[tokio::test]
    async fn get_returns_none_for_missing_key() {
        let storage = get_storage();

        assert_eq!(storage.get("user_nobody@example.com").await, Ok(None));
    }

    #[tokio::test]
    async fn set_then_get_returns_value() {
        let storage = get_storage();

        storage.set("jobs_1", "[]").await.unwrap();

        assert_eq!(storage.get("jobs_1").await, Ok(Some("[]".to_owned())));
    }

    #[tokio::test]
    async fn set_overwrites_existing_value() {
        let storage = get_storage();

        storage.set("jobs_1", "[]").await.unwrap();
        storage.set("jobs_1", "[{}]").await.unwrap();

        assert_eq!(storage.get("jobs_1").await, Ok(Some("[{}]".to_owned())));
    }

    #[tokio::test]
    async fn new_keeps_existing_table() {
        let connection = Connection::open_in_memory().unwrap();
        connection
            .execute(
                "CREATE TABLE key_value (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
                (),
            )
            .unwrap();
        connection
            .execute(
                "INSERT INTO key_value (key, value) VALUES ('a', 'b')",
                (),
            )
            .unwrap();

        let storage = SqliteStorage::new(connection).unwrap();

        assert_eq!(storage.get("a").await, Ok(Some("b".to_owned())));
    }
}
