use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::UniqueId;
use crate::shared::response::{KeyValuePair, Status};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: i64,
    pub score: f32,
}

/// Partial or reduced search output; `hits[i]` holds the ranked hits of query `i`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub nq: i64,
    pub topk: i64,
    pub metric_type: String,
    pub hits: Vec<Vec<SearchHit>>,
    pub sealed_segment_ids_searched: Vec<UniqueId>,
    pub channel_ids_searched: Vec<String>,
}

/// Column of retrieved values, row-aligned with `RetrieveResults::ids`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldData {
    pub field_id: i64,
    pub field_name: String,
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetrieveResults {
    pub ids: Vec<i64>,
    pub fields_data: Vec<FieldData>,
    pub all_retrieve_count: i64,
}

impl RetrieveResults {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentStats {
    pub segment_id: UniqueId,
    pub row_count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsResponse {
    pub status: Status,
    pub stats: Vec<KeyValuePair>,
}

impl StatisticsResponse {
    pub fn from_stats(stats: Vec<KeyValuePair>) -> Self {
        Self {
            status: Status::success(),
            stats,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.stats
            .iter()
            .find(|pair| pair.key == key)
            .map(|pair| pair.value.as_str())
    }
}
