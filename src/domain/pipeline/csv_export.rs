use anyhow::Context;
use chrono::NaiveDate;

use crate::domain::entities::dataset::{columns_of, RecordText, StockRecord};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("nothing to export")]
    NothingToExport,
    #[error("failed to serialize csv: {0}")]
    Serialize(String),
}

/// Full filtered/sorted view as CSV text. Columns follow the first record; a cell is
/// quoted only when it needs to be, with embedded quotes doubled. No trailing newline.
pub fn export_csv(records: &[StockRecord]) -> Result<String, ExportError> {
    if records.is_empty() {
        return Err(ExportError::NothingToExport);
    }
    write_csv(records).map_err(|err| ExportError::Serialize(format!("{err:#}")))
}

fn write_csv(records: &[StockRecord]) -> anyhow::Result<String> {
    let columns = columns_of(records);
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer
        .write_record(&columns)
        .context("failed to write csv header")?;
    for record in records {
        writer
            .write_record(columns.iter().map(|column| record.text(column)))
            .context("failed to write csv row")?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| anyhow::anyhow!("{}", err.error()))
        .context("failed to flush csv writer")?;
    let mut text = String::from_utf8(bytes).context("csv output is not utf-8")?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

pub fn export_file_name(today: NaiveDate) -> String {
    format!("screening_results_{}.csv", today.format("%Y-%m-%d"))
}
