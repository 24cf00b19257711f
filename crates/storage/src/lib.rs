//! Key-value persistence for the serialized cart.

pub mod error;
pub mod file;
pub mod memory;
pub mod snapshot;
pub mod store;

pub use error::{Result, StorageError};
pub use file::FileStore;
pub use memory::InMemoryStore;
pub use snapshot::{load_snapshot, save_snapshot};
pub use store::KeyValueStore;
