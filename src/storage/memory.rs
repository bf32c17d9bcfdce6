use std::collections::HashMap;
use std::sync::Mutex;

use crate::errors::{PlannerError, Result};

use super::PlannerStorage;

/// Keeps blobs in process memory. Useful for tests and for embedding the store
/// behind a host-provided key/value store.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates a blob, e.g. with data written by another client.
    pub fn with_blob(self, key: &str, data: impl Into<String>) -> Self {
        if let Ok(mut blobs) = self.blobs.lock() {
            blobs.insert(key.to_string(), data.into());
        }
        self
    }

    pub fn blob(&self, key: &str) -> Option<String> {
        self.blobs.lock().ok()?.get(key).cloned()
    }
}

impl PlannerStorage for MemoryStorage {
    fn read_blob(&self, key: &str) -> Result<Option<String>> {
        let blobs = self
            .blobs
            .lock()
            .map_err(|_| PlannerError::StorageError("memory storage lock poisoned".into()))?;
        Ok(blobs.get(key).cloned())
    }

    fn write_blob(&self, key: &str, data: &str) -> Result<()> {
        let mut blobs = self
            .blobs
            .lock()
            .map_err(|_| PlannerError::StorageError("memory storage lock poisoned".into()))?;
        blobs.insert(key.to_string(), data.to_string());
        Ok(())
    }
}
