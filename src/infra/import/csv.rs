use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::entities::dataset::{columns_of, RecordText, Scalar, StockRecord};
use crate::usecase::ports::repo::{DatasetRepository, RepoError};

/// CSV file read and rewritten as a whole.
pub struct CsvDataset {
    path: PathBuf,
}

impl CsvDataset {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DatasetRepository for CsvDataset {
    fn load(&self) -> Result<Vec<StockRecord>, RepoError> {
        read_csv_records(&self.path).map_err(RepoError::from_anyhow)
    }

    fn store(&self, records: &[StockRecord]) -> Result<(), RepoError> {
        write_csv_records(&self.path, records).map_err(RepoError::from_anyhow)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

pub fn read_csv_records(csv_path: &Path) -> Result<Vec<StockRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(csv_path)
        .with_context(|| format!("failed to open csv: {}", csv_path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("failed to read headers from csv: {}", csv_path.display()))?
        .clone();

    if headers.is_empty() {
        anyhow::bail!("csv header is required")
    }

    let mut records = Vec::new();
    for (row_idx, row) in reader.records().enumerate() {
        let row = row.with_context(|| format!("failed to parse csv record #{}", row_idx + 1))?;
        let record: StockRecord = headers
            .iter()
            .enumerate()
            .map(|(col_idx, header)| {
                (header.to_string(), Scalar::parse(row.get(col_idx).unwrap_or("")))
            })
            .collect();
        records.push(record);
    }

    Ok(records)
}

pub fn write_csv_records(csv_path: &Path, records: &[StockRecord]) -> Result<()> {
    if let Some(parent) = csv_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create parent dir: {}", parent.display()))?;
    }

    let mut writer = csv::Writer::from_path(csv_path)
        .with_context(|| format!("failed to create csv: {}", csv_path.display()))?;
    let columns = columns_of(records);
    if !columns.is_empty() {
        writer
            .write_record(&columns)
            .context("failed to write csv header")?;
    }
    for record in records {
        writer
            .write_record(columns.iter().map(|column| record.text(column)))
            .context("failed to write csv record")?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to flush csv: {}", csv_path.display()))?;
    Ok(())
}
