//! Identifier types for users and records.
//!
//! New identifiers are UUIDv7 strings: they sort by creation time, and the
//! random bits keep two identifiers minted in the same millisecond distinct.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A newtype wrapper for user IDs.
///
/// This helps disambiguate user IDs from record IDs, leading to better compile time errors.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Generate a new, unique user ID.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Wrap an existing ID without generating a new one.
    pub fn new(id: &str) -> Self {
        Self(id.to_owned())
    }

    /// The ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The ID of a transaction or job record.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Generate a new, unique record ID.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Wrap an existing ID without generating a new one.
    pub fn new(id: &str) -> Self {
        Self(id.to_owned())
    }

    /// The ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod id_tests {
    use std::collections::HashSet;

    use super::{RecordId, UserId};

    #[test]
    fn ids_generated_in_quick_succession_are_unique() {
        let ids: HashSet<RecordId> = (0..1000).map(|_| RecordId::generate()).collect();

        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn generated_ids_increase_over_time() {
        let first = RecordId::generate();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = RecordId::generate();

        assert!(first.as_str() < second.as_str());
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = UserId::new("1700000000000");

        assert_eq!(serde_json::to_string(&id).unwrap(), "\"1700000000000\"");
    }
}
