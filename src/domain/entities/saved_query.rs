use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::query::{FilterSet, SortConfig};

/// A named filter+sort snapshot. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedQuery {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    pub filters: FilterSet,
    pub sort_config: Option<SortConfig>,
    pub timestamp: DateTime<Utc>,
    pub result_count: usize,
    pub total_count: usize,
}

impl SavedQuery {
    /// Filters rebuilt from the replay encoding, so blank entries never come back.
    pub fn replay_filters(&self) -> FilterSet {
        FilterSet::from_query_string(&self.replay_query_string())
    }

    pub fn replay_query_string(&self) -> String {
        self.filters.to_query_string()
    }
}

/// What the caller hands to the store; id and timestamp are assigned on create.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewSavedQuery {
    pub name: String,
    pub description: String,
    pub tags: BTreeSet<String>,
    pub filters: FilterSet,
    pub sort_config: Option<SortConfig>,
    pub result_count: usize,
    pub total_count: usize,
}

/// Default name offered in the save dialog.
pub fn auto_query_name(filters: &FilterSet, today: NaiveDate) -> String {
    let fields = filters.active_fields();
    if fields.is_empty() {
        format!("Stock Query {}", today.format("%Y-%m-%d"))
    } else {
        format!("Query with {}", fields.join(", "))
    }
}

/// Newest first, at most `limit` entries. The store itself keeps append order.
pub fn most_recent(queries: &[SavedQuery], limit: usize) -> Vec<SavedQuery> {
    let mut sorted = queries.to_vec();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    sorted.truncate(limit);
    sorted
}
