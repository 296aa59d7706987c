use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Reader};

use crate::domain::entities::dataset::{Scalar, StockRecord};
use crate::usecase::ports::repo::{DatasetRepository, RepoError};

/// Worksheet source; the first row holds the headers. Read-only.
pub struct XlsxDataset {
    path: PathBuf,
    sheet: Option<String>,
}

impl XlsxDataset {
    pub fn new(path: impl Into<PathBuf>, sheet: Option<String>) -> Self {
        Self {
            path: path.into(),
            sheet,
        }
    }
}

impl DatasetRepository for XlsxDataset {
    fn load(&self) -> Result<Vec<StockRecord>, RepoError> {
        read_xlsx_records(&self.path, self.sheet.as_deref()).map_err(RepoError::from_anyhow)
    }

    fn store(&self, _records: &[StockRecord]) -> Result<(), RepoError> {
        Err(RepoError::ReadOnly(self.describe()))
    }

    fn describe(&self) -> String {
        match &self.sheet {
            Some(sheet) => format!("{}#{sheet}", self.path.display()),
            None => self.path.display().to_string(),
        }
    }
}

pub fn cell_to_scalar(cell: &Data) -> Scalar {
    match cell {
        Data::Float(v) if v.is_finite() => Scalar::number(*v),
        Data::Int(v) => Scalar::Number {
            value: *v as f64,
            raw: v.to_string(),
        },
        Data::String(v) => Scalar::parse(v),
        Data::Bool(v) => Scalar::String(v.to_string()),
        Data::DateTime(v) => Scalar::String(v.to_string()),
        Data::DateTimeIso(v) => Scalar::String(v.to_string()),
        Data::DurationIso(v) => Scalar::String(v.to_string()),
        Data::Error(v) => Scalar::String(format!("{v:?}")),
        Data::Float(_) | Data::Empty => Scalar::Null,
    }
}

fn header_text(cell: &Data, col_idx: usize) -> String {
    let text = cell_to_scalar(cell).to_string();
    if text.trim().is_empty() {
        format!("Column {}", col_idx + 1)
    } else {
        text.trim().to_string()
    }
}

pub fn read_xlsx_records(xlsx_path: &Path, sheet: Option<&str>) -> Result<Vec<StockRecord>> {
    let mut workbook = open_workbook_auto(xlsx_path)
        .with_context(|| format!("failed to open workbook: {}", xlsx_path.display()))?;

    let sheet_name = match sheet {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .with_context(|| format!("workbook has no sheets: {}", xlsx_path.display()))?,
    };
    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("failed to read sheet: {sheet_name}"))?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(Vec::new());
    };
    let headers: Vec<String> = header_row
        .iter()
        .enumerate()
        .map(|(col_idx, cell)| header_text(cell, col_idx))
        .collect();

    let records = rows
        .filter(|row| row.iter().any(|cell| !matches!(cell, Data::Empty)))
        .map(|row| {
            headers
                .iter()
                .enumerate()
                .map(|(col_idx, header)| {
                    let value = row.get(col_idx).map(cell_to_scalar).unwrap_or(Scalar::Null);
                    (header.clone(), value)
                })
                .collect::<StockRecord>()
        })
        .collect();

    Ok(records)
}
