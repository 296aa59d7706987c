use std::path::Path;

use anyhow::{anyhow, Result};
use tracing::info;

use crate::domain::entities::dataset::StockRecord;
use crate::infra::import::csv::CsvDataset;
use crate::infra::import::xlsx::XlsxDataset;
use crate::usecase::ports::repo::DatasetRepository;

/// Picks a dataset adapter from the file extension.
pub fn open_dataset(path: &Path) -> Result<Box<dyn DatasetRepository>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "csv" => Ok(Box::new(CsvDataset::new(path))),
        "xlsx" | "xlsm" | "xls" | "ods" => Ok(Box::new(XlsxDataset::new(path, None))),
        other => Err(anyhow!(
            "unsupported dataset format: {} ({})",
            if other.is_empty() { "no extension" } else { other },
            path.display()
        )),
    }
}

pub struct ImportService;

impl ImportService {
    pub fn new() -> Self {
        Self
    }

    pub fn load(&self, path: &Path) -> Result<Vec<StockRecord>> {
        let dataset = open_dataset(path)?;
        let records = dataset.load().map_err(|err| anyhow!(err))?;
        info!(source = %dataset.describe(), rows = records.len(), "dataset loaded");
        Ok(records)
    }

    /// Rewrites the whole file; only CSV targets are writable.
    pub fn save(&self, path: &Path, records: &[StockRecord]) -> Result<()> {
        let dataset = open_dataset(path)?;
        dataset.store(records).map_err(|err| anyhow!(err))?;
        info!(target_file = %dataset.describe(), rows = records.len(), "dataset written");
        Ok(())
    }
}

impl Default for ImportService {
    fn default() -> Self {
        Self::new()
    }
}
