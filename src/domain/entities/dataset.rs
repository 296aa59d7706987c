use std::cmp::Ordering;
use std::fmt;

use indexmap::IndexMap;

/// A single cell value. Screening datasets routinely mix numbers and blanks in one
/// column, so every field carries its own variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// `raw` is the text the number was read from. Display, filtering and export
    /// use it; `value` only drives numeric comparison.
    Number { value: f64, raw: String },
    String(String),
    Null,
}

impl Scalar {
    pub fn number(value: f64) -> Self {
        Scalar::Number {
            value,
            raw: value.to_string(),
        }
    }

    /// Blank text becomes `Null`, finite numeric text becomes `Number` keeping the
    /// text as written (`0050` stays `0050`).
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Scalar::Null;
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => Scalar::Number {
                value,
                raw: text.to_string(),
            },
            _ => Scalar::String(text.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Scalar::Number { value, .. } => Some(*value),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number { raw, .. } => f.write_str(raw),
            Scalar::String(value) => f.write_str(value),
            Scalar::Null => Ok(()),
        }
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::number(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::String(value)
    }
}

impl From<serde_json::Value> for Scalar {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Scalar::Null,
            serde_json::Value::Number(number) => match number.as_f64() {
                Some(value) => Scalar::Number {
                    value,
                    raw: number.to_string(),
                },
                None => Scalar::String(number.to_string()),
            },
            serde_json::Value::String(text) => Scalar::String(text),
            serde_json::Value::Bool(flag) => Scalar::String(flag.to_string()),
            other => Scalar::String(other.to_string()),
        }
    }
}

/// One screening row. Key order is column order, so the map keeps insertion order.
pub type StockRecord = IndexMap<String, Scalar>;

pub trait RecordText {
    /// String form of a field; missing fields and nulls read as "".
    fn text(&self, key: &str) -> String;
}

impl RecordText for StockRecord {
    fn text(&self, key: &str) -> String {
        self.get(key).map(Scalar::to_string).unwrap_or_default()
    }
}

/// Column set of a result view: the key order of its first record.
pub fn columns_of(records: &[StockRecord]) -> Vec<String> {
    records
        .first()
        .map(|record| record.keys().cloned().collect())
        .unwrap_or_default()
}

/// Case-insensitive ordering with a raw tie-break, standing in for a locale collator.
pub fn locale_compare(left: &str, right: &str) -> Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| left.cmp(right))
}
