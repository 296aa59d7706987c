use crate::domain::entities::dataset::{RecordText, StockRecord};
use crate::domain::entities::query::FilterSet;

/// True when every non-empty constraint is a case-insensitive substring of the
/// record's value. A missing field reads as "" and so fails any constraint.
pub fn record_matches(record: &StockRecord, filters: &FilterSet) -> bool {
    filters.active().all(|(field, needle)| {
        record
            .text(field)
            .to_lowercase()
            .contains(&needle.to_lowercase())
    })
}

/// Surviving records in their original relative order.
pub fn filter_records(records: &[StockRecord], filters: &FilterSet) -> Vec<StockRecord> {
    if !filters.has_active() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|record| record_matches(record, filters))
        .cloned()
        .collect()
}
