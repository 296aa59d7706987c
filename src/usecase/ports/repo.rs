use crate::domain::entities::dataset::StockRecord;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepoError {
    #[error("{0}")]
    Message(String),
    #[error("{0} is read-only")]
    ReadOnly(String),
}

impl RepoError {
    pub fn from_anyhow(err: anyhow::Error) -> Self {
        RepoError::Message(format!("{err:#}"))
    }
}

/// Tabular store read and rewritten wholesale. Callers doing read-then-write must
/// tolerate other writers in between.
pub trait DatasetRepository: Send + Sync {
    fn load(&self) -> Result<Vec<StockRecord>, RepoError>;
    fn store(&self, records: &[StockRecord]) -> Result<(), RepoError>;
    fn describe(&self) -> String;
}

/// Persistent key-value medium; each value is read and written as one unit.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, RepoError>;
    fn set(&self, key: &str, value: &str) -> Result<(), RepoError>;
}
