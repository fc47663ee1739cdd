//! JSON encoding of values kept in the storage adapter.

use serde::{Serialize, de::DeserializeOwned};

use crate::Error;

/// Serialize `value` as a JSON string.
///
/// # Errors
///
/// Returns [Error::Serialization] if `value` cannot be represented as JSON.
pub(crate) fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String, Error> {
    serde_json::to_string(value).map_err(|error| Error::Serialization(error.to_string()))
}

/// Deserialize a JSON string produced by [encode].
///
/// # Errors
///
/// Returns [Error::Deserialization] if `text` is not valid JSON for `T`.
pub(crate) fn decode<T: DeserializeOwned>(text: &str) -> Result<T, Error> {
    serde_json::from_str(text).map_err(|error| Error::Deserialization(error.to_string()))
}

/// Deserialize a JSON array, skipping the elements that are not valid `T`.
///
/// # Errors
///
/// Returns [Error::Deserialization] if `text` is not a JSON array.
pub(crate) fn decode_each<T: DeserializeOwned>(text: &str) -> Result<Vec<T>, Error> {
    let values: Vec<serde_json::Value> = decode(text)?;

    let items = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            serde_json::from_value(value)
                .inspect_err(|error| tracing::warn!("Skipping unreadable item {index}: {error}"))
                .ok()
        })
        .collect();

    Ok(items)
}
