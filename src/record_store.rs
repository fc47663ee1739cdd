//! A per-user collection of records persisted as a single JSON array.
//!
//! Each mutation writes the whole collection back to storage. Two sessions
//! writing the same collection will overwrite each other's changes.

use serde::{Serialize, de::DeserializeOwned};

use crate::{
    Error,
    codec::{decode_each, encode},
    id::{RecordId, UserId},
    storage::{Storage, collection_key},
};

/// A record that can be kept in a [RecordStore].
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// The validated fields of a record, i.e. everything except its ID.
    type Fields;

    /// The prefix of the storage key the collection is kept under.
    const COLLECTION: &'static str;

    /// The ID that uniquely identifies the record within its collection.
    fn id(&self) -> &RecordId;

    /// Assemble a record from its ID and fields.
    fn from_fields(id: RecordId, fields: Self::Fields) -> Self;
}

/// The records of one type owned by one user, in insertion order.
#[derive(Debug, Clone)]
pub struct RecordStore<R, S> {
    storage: S,
    key: String,
    records: Vec<R>,
}

impl<R: Record, S: Storage> RecordStore<R, S> {
    /// Load the collection belonging to `user_id`.
    ///
    /// A missing collection loads as empty. So does a value that is not a
    /// JSON array at all: the corrupt value is logged and left in storage
    /// until the next mutation overwrites it. Within an array, only the
    /// records that cannot be read are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error only if `storage` could not be read.
    pub async fn load(storage: S, user_id: &UserId) -> Result<Self, Error> {
        let key = collection_key(R::COLLECTION, user_id.as_str());

        let records = match storage.get(&key).await? {
            None => Vec::new(),
            Some(text) => decode_each(&text).unwrap_or_else(|error| {
                tracing::warn!("Discarding unreadable collection {key}: {error}");
                Vec::new()
            }),
        };

        tracing::debug!("Loaded {} records from {key}", records.len());

        Ok(Self {
            storage,
            key,
            records,
        })
    }

    /// The records in insertion order.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// The storage key the collection is persisted under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Get the record with the ID `id`.
    pub fn get(&self, id: &RecordId) -> Option<&R> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// Add a new record with a freshly generated ID to the end of the collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection could not be written, in which case
    /// the collection is left unchanged.
    pub async fn create(&mut self, fields: R::Fields) -> Result<R, Error> {
        let record = R::from_fields(RecordId::generate(), fields);

        let mut records = self.records.clone();
        records.push(record.clone());
        self.save(records).await?;

        tracing::debug!("Created record {} in {}", record.id(), self.key);

        Ok(record)
    }

    /// Replace the fields of the record with the ID `id`, keeping its position.
    ///
    /// Returns `None` if there is no such record. The collection is written
    /// back either way.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection could not be written, in which case
    /// the collection is left unchanged.
    pub async fn update(&mut self, id: &RecordId, fields: R::Fields) -> Result<Option<R>, Error> {
        let mut records = self.records.clone();
        let updated = records
            .iter_mut()
            .find(|record| record.id() == id)
            .map(|record| {
                *record = R::from_fields(id.clone(), fields);
                record.clone()
            });

        self.save(records).await?;

        match &updated {
            Some(_) => tracing::debug!("Updated record {id} in {}", self.key),
            None => tracing::debug!("Ignored update of missing record {id} in {}", self.key),
        }

        Ok(updated)
    }

    /// Remove the record with the ID `id`.
    ///
    /// Deleting a record that does not exist is not an error. The collection
    /// is written back either way.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection could not be written, in which case
    /// the collection is left unchanged.
    pub async fn delete(&mut self, id: &RecordId) -> Result<(), Error> {
        let records: Vec<R> = self
            .records
            .iter()
            .filter(|record| record.id() != id)
            .cloned()
            .collect();

        self.save(records).await?;
        tracing::debug!("Deleted record {id} from {}", self.key);

        Ok(())
    }

    async fn save(&mut self, records: Vec<R>) -> Result<(), Error> {
        let text = encode(&records)?;
        self.storage.set(&self.key, &text).await?;
        self.records = records;

        Ok(())
    }
}
