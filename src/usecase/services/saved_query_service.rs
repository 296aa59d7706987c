use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::entities::saved_query::{NewSavedQuery, SavedQuery};
use crate::usecase::ports::repo::{KeyValueStore, RepoError};

/// Single key holding the whole saved query collection.
pub const SAVED_QUERIES_KEY: &str = "screener.saved_queries";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SavedQueryError {
    #[error("query name is required")]
    EmptyName,
    #[error("result count {result_count} exceeds total count {total_count}")]
    CountMismatch {
        result_count: usize,
        total_count: usize,
    },
    #[error("failed to encode saved queries: {0}")]
    Encode(String),
    #[error("failed to persist saved queries: {0}")]
    Storage(#[from] RepoError),
}

/// Owner of the persisted saved query collection.
///
/// Every mutation reads the full blob, edits it in memory and writes the full blob
/// back. The mutex serializes that cycle within this process; other processes sharing
/// the medium are not coordinated and the last full write wins.
pub struct SavedQueryStore {
    kv: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl SavedQueryStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            write_lock: Mutex::new(()),
        }
    }

    /// Collection in append order. Unreadable or corrupt storage yields an empty list.
    pub fn list(&self) -> Vec<SavedQuery> {
        let _guard = self.lock();
        self.read_all().unwrap_or_else(|err| {
            warn!(error = %err, "saved queries unreadable; treating as empty");
            Vec::new()
        })
    }

    pub fn create(&self, definition: NewSavedQuery) -> Result<SavedQuery, SavedQueryError> {
        let name = definition.name.trim().to_string();
        if name.is_empty() {
            return Err(SavedQueryError::EmptyName);
        }
        if definition.result_count > definition.total_count {
            return Err(SavedQueryError::CountMismatch {
                result_count: definition.result_count,
                total_count: definition.total_count,
            });
        }

        let saved = SavedQuery {
            id: Uuid::new_v4(),
            name,
            description: definition.description.trim().to_string(),
            tags: definition.tags,
            filters: definition.filters,
            sort_config: definition.sort_config,
            timestamp: Utc::now(),
            result_count: definition.result_count,
            total_count: definition.total_count,
        };

        let _guard = self.lock();
        let mut queries = self.read_all()?;
        queries.push(saved.clone());
        self.write_all(&queries)?;

        info!(
            query_id = %saved.id,
            name = %saved.name,
            result_count = saved.result_count,
            total = queries.len(),
            "saved query created"
        );
        Ok(saved)
    }

    /// Unknown ids are a no-op, not an error.
    pub fn delete(&self, id: Uuid) -> Result<(), SavedQueryError> {
        let _guard = self.lock();
        let mut queries = self.read_all()?;
        let before = queries.len();
        queries.retain(|query| query.id != id);
        if queries.len() == before {
            info!(query_id = %id, "saved query not found; nothing to delete");
            return Ok(());
        }
        self.write_all(&queries)?;
        info!(query_id = %id, remaining = queries.len(), "saved query deleted");
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// A medium that cannot be read is an error, so a write never replaces data it
    /// did not see. Only a corrupt blob reads as empty.
    fn read_all(&self) -> Result<Vec<SavedQuery>, RepoError> {
        let Some(blob) = self.kv.get(SAVED_QUERIES_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<SavedQuery>>(&blob) {
            Ok(queries) => Ok(queries),
            Err(err) => {
                warn!(error = %err, "saved queries blob is corrupt; treating as empty");
                Ok(Vec::new())
            }
        }
    }

    fn write_all(&self, queries: &[SavedQuery]) -> Result<(), SavedQueryError> {
        let blob = serde_json::to_string(queries)
            .map_err(|err| SavedQueryError::Encode(err.to_string()))?;
        self.kv.set(SAVED_QUERIES_KEY, &blob)?;
        Ok(())
    }
}
