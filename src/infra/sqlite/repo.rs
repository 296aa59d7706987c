use std::path::PathBuf;

use crate::infra::sqlite::queries::{read_value, write_value};
use crate::infra::sqlite::schema::init_db;
use crate::usecase::ports::repo::{KeyValueStore, RepoError};

/// Key-value medium on a local SQLite file.
pub struct SqliteKvStore {
    pub db_path: PathBuf,
}

impl SqliteKvStore {
    pub fn open(db_path: PathBuf) -> Result<Self, RepoError> {
        init_db(&db_path).map_err(RepoError::from_anyhow)?;
        Ok(Self { db_path })
    }
}

impl KeyValueStore for SqliteKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, RepoError> {
        read_value(&self.db_path, key).map_err(RepoError::from_anyhow)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), RepoError> {
        write_value(&self.db_path, key, value).map_err(RepoError::from_anyhow)
    }
}
