//! Key/value persistence for progress tracking and assessment history.
//! The matching engine never depends on it.

pub mod file;
pub mod history;
pub mod progress;

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::errors::AppError;

pub use file::JsonFileStore;
pub use history::{AssessmentHistory, AssessmentRecord, RecordedMatch};
pub use progress::{ProgressSummary, ProgressTracker, StreakStatus, UserProgress};

/// Minimal get/set store. Implementations use interior mutability so one store
/// can be shared behind an `Arc<dyn KeyValueStore>`.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;
    fn set(&self, key: &str, value: String) -> Result<(), AppError>;
    fn remove(&self, key: &str) -> Result<(), AppError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: String) -> Result<(), AppError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        (**self).remove(key)
    }
}

/// Process-local store. Used by tests and by callers that do not persist.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> AppError {
    AppError::Storage("store lock poisoned".to_string())
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let values = self.values.read().map_err(|_| poisoned())?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), AppError> {
        let mut values = self.values.write().map_err(|_| poisoned())?;
        values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        let mut values = self.values.write().map_err(|_| poisoned())?;
        values.remove(key);
        Ok(())
    }
}
