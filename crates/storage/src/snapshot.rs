use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{KeyValueStore, Result};

/// Reads and deserializes the JSON snapshot stored under `key`.
///
/// Returns `None` when the slot has never been written.
pub fn load_snapshot<T, K>(store: &K, key: &str) -> Result<Option<T>>
where
    T: DeserializeOwned,
    K: KeyValueStore + ?Sized,
{
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Serializes `state` to JSON and overwrites the slot under `key`.
pub fn save_snapshot<T, K>(store: &K, key: &str, state: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    K: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(state)?;
    store.set(key, &raw)
}
