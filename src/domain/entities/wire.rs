//! Serde helpers for the stored JSON layout.
//!
//! Records written by earlier ledger versions contain `null` where an empty
//! list was meant (`"assetIds": null`, `"owner": null`).

use serde::{Deserialize, Deserializer};

/// Deserializes `null` as `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
