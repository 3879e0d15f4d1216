//! Durable snapshot storage behind the marketplace stores.
//!
//! Stores write the complete affected collection after every mutation, so the
//! adapter contract stays narrow: a keyed `load`/`save` pair over JSON
//! snapshots. Deployed configurations swap the backend (local files vs. a
//! remote service) without touching store logic.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// Durable keys used by the marketplace stores.
pub mod keys {
    /// Full `User` collection.
    pub const USERS: &str = "users";
    /// Full `Internship` collection.
    pub const INTERNSHIPS: &str = "internships";
    /// Full `Application` collection.
    pub const APPLICATIONS: &str = "applications";
    /// Current session snapshot (`null` when signed out).
    pub const SESSION: &str = "session";
}

/// Storage abstraction backing both marketplace stores.
///
/// `load` returns the snapshot previously saved under `key`, or `None` on a
/// first run. `save` durably replaces the snapshot under `key`.
pub trait PersistenceAdapter: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<Value>, StorageError>;
    fn save(&self, key: &str, value: &Value) -> Result<(), StorageError>;
}

/// Error enumeration for adapter and snapshot-codec failures.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("snapshot under '{key}' could not be decoded")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("snapshot under '{key}' could not be encoded")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Load and decode the snapshot under `key`, if one was ever saved.
pub(crate) fn read_snapshot<T, P>(adapter: &P, key: &str) -> Result<Option<T>, StorageError>
where
    T: DeserializeOwned,
    P: PersistenceAdapter + ?Sized,
{
    match adapter.load(key)? {
        Some(value) => {
            let decoded = serde_json::from_value(value).map_err(|source| StorageError::Decode {
                key: key.to_string(),
                source,
            })?;
            Ok(Some(decoded))
        }
        None => Ok(None),
    }
}

/// Encode and durably save `value` under `key`.
pub(crate) fn write_snapshot<T, P>(adapter: &P, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize,
    P: PersistenceAdapter + ?Sized,
{
    let encoded = serde_json::to_value(value).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })?;
    adapter.save(key, &encoded)
}

/// In-memory adapter for tests and the CLI demo.
#[derive(Default)]
pub struct MemoryAdapter {
    snapshots: Mutex<HashMap<String, Value>>,
}

impl PersistenceAdapter for MemoryAdapter {
    fn load(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let snapshots = self.snapshots.lock().expect("adapter mutex poisoned");
        Ok(snapshots.get(key).cloned())
    }

    fn save(&self, key: &str, value: &Value) -> Result<(), StorageError> {
        let mut snapshots = self.snapshots.lock().expect("adapter mutex poisoned");
        snapshots.insert(key.to_string(), value.clone());
        Ok(())
    }
}

/// File-backed adapter storing one JSON document per key under a data
/// directory. Writes land in a temp file first and are renamed into place, so
/// a crash mid-write never leaves a torn snapshot.
pub struct JsonFileAdapter {
    data_dir: PathBuf,
}

impl JsonFileAdapter {
    /// Create an adapter rooted at `data_dir`, creating the directory if needed.
    pub fn new(data_dir: &Path) -> Result<Self, StorageError> {
        fs::create_dir_all(data_dir)
            .map_err(|err| StorageError::Unavailable(format!("{}: {err}", data_dir.display())))?;
        Ok(Self {
            data_dir: data_dir.to_path_buf(),
        })
    }

    fn snapshot_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{key}.json"))
    }
}

impl PersistenceAdapter for JsonFileAdapter {
    fn load(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let path = self.snapshot_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .map_err(|err| StorageError::Unavailable(format!("{}: {err}", path.display())))?;
        let value = serde_json::from_str(&content).map_err(|source| StorageError::Decode {
            key: key.to_string(),
            source,
        })?;

        debug!(key, path = %path.display(), "loaded snapshot");
        Ok(Some(value))
    }

    fn save(&self, key: &str, value: &Value) -> Result<(), StorageError> {
        let path = self.snapshot_path(key);
        let staging = self.data_dir.join(format!("{key}.json.tmp"));

        let content = serde_json::to_string_pretty(value).map_err(|source| StorageError::Encode {
            key: key.to_string(),
            source,
        })?;
        fs::write(&staging, content)
            .map_err(|err| StorageError::Unavailable(format!("{}: {err}", staging.display())))?;
        fs::rename(&staging, &path)
            .map_err(|err| StorageError::Unavailable(format!("{}: {err}", path.display())))?;

        debug!(key, path = %path.display(), "saved snapshot");
        Ok(())
    }
}
