//! Local key/value storage.
//!
//! The storefront keeps shopper state the way a browser keeps `localStorage`:
//! string values under string keys, nothing more. Encoding (JSON for the
//! cart) is the caller's job.
//!
//! # Backends
//!
//! - [`FileStorage`] - one JSON object file on disk, used by the binary
//! - [`MemoryStorage`] - in-process map, used by tests

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when reading or writing local storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but is not a JSON object of strings.
    #[error("storage file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// String key/value store.
///
/// Methods take `&self` so a single store can be shared behind an `Arc`;
/// implementations handle their own locking.
pub trait LocalStorage: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}
