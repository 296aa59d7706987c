use std::collections::HashMap;
use std::sync::RwLock;

use crate::usecase::ports::repo::{KeyValueStore, RepoError};

/// Process-local medium; used when the SQLite file is unavailable.
#[derive(Default)]
pub struct MemoryKvStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, RepoError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| RepoError::Message("memory store lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), RepoError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| RepoError::Message("memory store lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
