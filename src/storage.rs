// SPDX-License-Identifier: MPL-2.0
//! Persistent key-value storage for small pieces of UI state.
//!
//! A [`Storage`] handle is scoped to one key with a default value. Reads are
//! synchronous; writes never fail to the caller and are logged instead, so a
//! broken disk does not interrupt a language switch.
//!
//! # Backends
//!
//! - [`FileStorage`] keeps every key in a flat TOML table (`storage.toml` in
//!   the application data directory).
//! - [`MemoryStorage`] keeps values in memory, for tests and ephemeral sessions.

use crate::config::STORAGE_FILE;
use crate::error::{Error, Result};
use crate::paths;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Backing medium for [`Storage`] handles.
pub trait StorageBackend: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

/// A handle bound to a single key with a default value.
#[derive(Clone)]
pub struct Storage {
    backend: Arc<dyn StorageBackend>,
    key: String,
    default_value: String,
}

/// Creates a handle for `key` that reads `default_value` until something is stored.
pub fn create_storage(
    backend: Arc<dyn StorageBackend>,
    key: impl Into<String>,
    default_value: impl Into<String>,
) -> Storage {
    Storage {
        backend,
        key: key.into(),
        default_value: default_value.into(),
    }
}

impl Storage {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn default_value(&self) -> &str {
        &self.default_value
    }

    /// Returns the stored value, or the default when nothing is stored or the read fails.
    pub fn get(&self) -> String {
        match self.backend.read(&self.key) {
            Ok(Some(value)) => value,
            Ok(None) => self.default_value.clone(),
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "Failed to read stored value");
                self.default_value.clone()
            }
        }
    }

    pub fn set(&self, value: &str) {
        match self.backend.write(&self.key, value) {
            Ok(()) => tracing::debug!(key = %self.key, value, "Stored value"),
            Err(err) => {
                tracing::warn!(key = %self.key, value, error = %err, "Failed to store value")
            }
        }
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("key", &self.key)
            .field("default_value", &self.default_value)
            .finish_non_exhaustive()
    }
}

/// TOML-file backed storage.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Storage file in the application data directory (see [`paths::get_app_data_dir`]).
    pub fn in_data_dir() -> Result<Self> {
        Self::in_data_dir_with_override(None)
    }

    pub fn in_data_dir_with_override(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut path = paths::get_app_data_dir_with_override(base_dir)
            .ok_or_else(|| Error::Config("cannot determine data directory".to_string()))?;
        path.push(STORAGE_FILE);
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_table(&self) -> Result<toml::Table> {
        if !self.path.exists() {
            return Ok(toml::Table::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(toml::from_str(&content)?)
    }
}

impl StorageBackend for FileStorage {
    /// Non-string values under `key` read as absent.
    fn read(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let table = self.read_table()?;
        Ok(table.get(key).and_then(toml::Value::as_str).map(str::to_string))
    }

    /// An unreadable or corrupt file is replaced, so the new value is always stored.
    fn write(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut table = self.read_table().unwrap_or_else(|err| {
            tracing::warn!(
                path = %self.path.display(),
                error = %err,
                "Discarding unreadable storage file"
            );
            toml::Table::new()
        });
        table.insert(key.to_string(), toml::Value::String(value.to_string()));

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, toml::to_string_pretty(&table)?)?;
        Ok(())
    }
}

/// In-memory storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with one key.
    pub fn with_value(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        storage
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
