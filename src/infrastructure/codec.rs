//! # JSON Codec
//!
//! Encoding of ledger records and decoding of stored values and inbound
//! payloads. Stored values are compact JSON; a zero-length value is treated
//! as absent.

use crate::domain::errors::{DomainError, DomainResult};
use crate::infrastructure::persistence::traits::{RepositoryError, RepositoryResult};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Encodes a record as JSON bytes.
///
/// # Errors
///
/// Returns `RepositoryError::Serialization` if the value cannot be encoded.
pub fn encode<T: Serialize>(value: &T) -> RepositoryResult<Vec<u8>> {
    serde_json::to_vec(value).map_err(RepositoryError::serialization)
}

/// Decodes a value read from the store under `key`.
///
/// # Errors
///
/// Returns `RepositoryError::CorruptRecord` naming `key` on malformed JSON.
pub fn decode_record<T: DeserializeOwned>(key: &str, bytes: &[u8]) -> RepositoryResult<T> {
    serde_json::from_slice(bytes).map_err(|e| RepositoryError::corrupt_record(key, e))
}

/// Decodes a stored value, treating an absent or zero-length value as `None`.
///
/// # Errors
///
/// Returns `RepositoryError::CorruptRecord` naming `key` on malformed JSON.
pub fn decode_stored<T: DeserializeOwned>(
    key: &str,
    bytes: Option<Vec<u8>>,
) -> RepositoryResult<Option<T>> {
    match bytes {
        Some(bytes) if !bytes.is_empty() => decode_record(key, &bytes).map(Some),
        _ => Ok(None),
    }
}

/// Decodes an inbound JSON argument.
///
/// # Errors
///
/// Returns `DomainError::InvalidRecord` naming `what` on malformed input.
pub fn decode_payload<T: DeserializeOwned>(what: &str, raw: &str) -> DomainResult<T> {
    serde_json::from_str(raw)
        .map_err(|e| DomainError::invalid_record(format!("malformed {what} payload: {e}")))
}
