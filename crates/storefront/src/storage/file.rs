//! File-backed storage.
//!
//! All keys live in one JSON object file, e.g.
//!
//! ```json
//! { "cart": "[{\"id\":1,\"quantity\":2,...}]" }
//! ```
//!
//! Values are stored as strings, exactly as a browser's `localStorage` would
//! hold them. Every write rewrites the whole file through a temp file and a
//! rename, so a crash mid-write leaves the previous contents in place.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::debug;

use super::{LocalStorage, StorageError};

type Items = BTreeMap<String, String>;

/// Storage persisted to a single JSON file.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileStorage {
    /// Storage backed by the file at `path`. The file and its parent
    /// directories are created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_items(&self) -> Result<Items, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Items::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        if contents.trim().is_empty() {
            return Ok(Items::new());
        }

        serde_json::from_str(&contents).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write_items(&self, items: &Items) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let json = serde_json::to_string_pretty(items).map_err(|source| {
            StorageError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;

        let mut tmp_name = self.path.file_name().map_or_else(
            || std::ffi::OsString::from("storage"),
            std::ffi::OsStr::to_os_string,
        );
        tmp_name.push(".tmp");
        let tmp_path = self.path.with_file_name(tmp_name);

        fs::write(&tmp_path, json).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp_path, &self.path).map_err(|e| self.io_error(e))?;

        debug!(path = %self.path.display(), keys = items.len(), "Local storage written");
        Ok(())
    }
}

impl LocalStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read_items()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        // A corrupt file is replaced rather than blocking every future write.
        let mut items = match self.read_items() {
            Ok(items) => items,
            Err(StorageError::Corrupt { .. }) => Items::new(),
            Err(e) => return Err(e),
        };
        items.insert(key.to_string(), value.to_string());
        self.write_items(&items)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut items = self.read_items()?;
        if items.remove(key).is_some() {
            self.write_items(&items)?;
        }
        Ok(())
    }
}
