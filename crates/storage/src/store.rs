use crate::Result;

/// A string-keyed slot store, in the spirit of browser local storage.
///
/// Values are opaque strings; writing a key replaces its previous value
/// wholesale. All implementations must be thread-safe (Send + Sync).
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`, or `None` if the slot is empty.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrites the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
