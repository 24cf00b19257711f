use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when reading or writing the key-value store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing a slot on disk failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The key cannot be mapped to a storage slot.
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// A stored value could not be serialized or deserialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
