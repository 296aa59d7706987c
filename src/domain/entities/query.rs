use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// Per-field substring constraints. An empty value is the same as no entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet(IndexMap<String, String>);

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> &str {
        self.0.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Entries that actually constrain: non-empty values, in insertion order.
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(field, value)| (field.as_str(), value.as_str()))
    }

    pub fn active_fields(&self) -> Vec<&str> {
        self.active().map(|(field, _)| field).collect()
    }

    pub fn has_active(&self) -> bool {
        self.active().next().is_some()
    }

    /// Copy keeping only the constraining entries.
    pub fn compacted(&self) -> FilterSet {
        FilterSet(
            self.active()
                .map(|(field, value)| (field.to_string(), value.to_string()))
                .collect(),
        )
    }

    /// `field=value&...` for the non-empty entries.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (field, value) in self.active() {
            serializer.append_pair(field, value);
        }
        serializer.finish()
    }

    pub fn from_query_string(query: &str) -> FilterSet {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut filters = FilterSet::new();
        for (field, value) in form_urlencoded::parse(query.as_bytes()) {
            if !value.is_empty() {
                filters.set(field.into_owned(), value.into_owned());
            }
        }
        filters
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FilterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut filters = FilterSet::new();
        for (field, value) in iter {
            filters.set(field, value);
        }
        filters
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: String,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Header click: same key flips direction, a new key starts ascending.
    pub fn toggled(current: Option<&SortConfig>, key: &str) -> SortConfig {
        match current {
            Some(active) if active.key == key && active.direction == SortDirection::Asc => {
                SortConfig::desc(key)
            }
            _ => SortConfig::asc(key),
        }
    }
}
