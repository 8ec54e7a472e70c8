//! JSON text encoding for stored values.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;
use crate::keys::StorageKey;
use crate::Store;

/// Serialize a value to JSON text.
///
/// # Errors
///
/// Returns `StoreError::Serialization` if the value cannot be encoded.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Deserialize a value from JSON text.
///
/// # Errors
///
/// Returns `StoreError::Serialization` if the text is not valid for `T`.
pub fn decode<T: DeserializeOwned>(text: &str) -> Result<T> {
    Ok(serde_json::from_str(text)?)
}

/// Read and decode the value under `key`, if present.
///
/// # Errors
///
/// Returns an error if the read fails or the stored text cannot be decoded.
pub fn load<S, T>(store: &S, key: StorageKey) -> Result<Option<T>>
where
    S: Store + ?Sized,
    T: DeserializeOwned,
{
    store.get(key)?.map(|text| decode(&text)).transpose()
}

/// Encode `value` and write it under `key`.
///
/// # Errors
///
/// Returns an error if encoding or the write fails.
pub fn save<S, T>(store: &S, key: StorageKey, value: &T) -> Result<()>
where
    S: Store + ?Sized,
    T: Serialize + ?Sized,
{
    let text = encode(value)?;
    tracing::debug!(key = %key, bytes = text.len(), "Persisting value");
    store.put(key, &text)
}
