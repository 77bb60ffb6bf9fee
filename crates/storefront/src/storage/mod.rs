//! Durable key/value storage for client-side state.
//!
//! The contract mirrors browser local storage: string keys map to string
//! values, a missing key is a normal outcome (`Ok(None)`), and every backend
//! can be cleared wholesale. Handles are cheap to clone and clones share the
//! same underlying data, so a store re-opened from a clone observes every
//! write made through the original.
//!
//! # Backends
//!
//! - [`MemoryStorage`] - process-local map, used by tests and ephemeral sessions
//! - [`FileStorage`] - one JSON file per key inside a data directory

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key cannot be represented by this backend.
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// The backend refused the operation (quota exceeded, disabled, ...).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// A key/value string store that outlives a single session.
pub trait DurableStorage {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read. A missing key is `Ok(None)`.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write is not acknowledged by the backend.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;

    /// Remove every key.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn clear(&self) -> Result<(), StorageError>;
}
