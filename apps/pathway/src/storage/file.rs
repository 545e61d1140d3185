use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;
use tracing::info;

use crate::errors::AppError;
use crate::storage::KeyValueStore;

/// Key/value store backed by a single JSON object on disk.
///
/// Every write replaces the whole file through a temp file in the same
/// directory followed by a rename, so readers never see a half-written file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Opens the store, loading existing contents. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();
        let values = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw).map_err(|e| {
                    AppError::Storage(format!("{} is not a valid store: {e}", path.display()))
                })?
            }
        } else {
            BTreeMap::new()
        };
        info!("Opened JSON store at {} ({} keys)", path.display(), values.len());
        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> Result<(), AppError> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        let body = serde_json::to_string_pretty(values)?;
        tmp.write_all(body.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| AppError::Io(e.error))?;
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>, AppError> {
        self.values
            .lock()
            .map_err(|_| AppError::Storage("store lock poisoned".to_string()))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.lock()?.get(key).cloned())
    }

    // The in-memory map only changes after the new contents reached disk.
    fn set(&self, key: &str, value: String) -> Result<(), AppError> {
        let mut values = self.lock()?;
        let mut next = values.clone();
        next.insert(key.to_string(), value);
        self.persist(&next)?;
        *values = next;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        let mut values = self.lock()?;
        if !values.contains_key(key) {
            return Ok(());
        }
        let mut next = values.clone();
        next.remove(key);
        self.persist(&next)?;
        *values = next;
        Ok(())
    }
}
