use serde_json::{Value, json};

use super::collection_factory::{AGE_FIELD_ID, PK_FIELD_ID};
use crate::engine::types::{FieldData, RetrieveResults, SearchHit, SearchResults, UniqueId};

pub struct SearchResultsFactory {
    hits: Vec<Vec<SearchHit>>,
    sealed: Vec<UniqueId>,
    channels: Vec<String>,
}

impl SearchResultsFactory {
    pub fn new() -> Self {
        Self {
            hits: Vec::new(),
            sealed: Vec::new(),
            channels: Vec::new(),
        }
    }

    /// Adds the hits of the next query as `(id, score)` pairs.
    pub fn with_query(mut self, hits: &[(i64, f32)]) -> Self {
        self.hits.push(
            hits.iter()
                .map(|(id, score)| SearchHit {
                    id: *id,
                    score: *score,
                })
                .collect(),
        );
        self
    }

    pub fn with_sealed_searched(mut self, segment_ids: &[UniqueId]) -> Self {
        self.sealed.extend_from_slice(segment_ids);
        self
    }

    pub fn with_channel(mut self, channel: &str) -> Self {
        self.channels.push(channel.to_string());
        self
    }

    pub fn create(self) -> SearchResults {
        SearchResults {
            nq: self.hits.len() as i64,
            topk: self.hits.iter().map(Vec::len).max().unwrap_or(0) as i64,
            metric_type: "L2".to_string(),
            hits: self.hits,
            sealed_segment_ids_searched: self.sealed,
            channel_ids_searched: self.channels,
        }
    }
}

/// Rows of `pk` and `age`, with `age = pk * 10`.
pub struct RetrieveResultsFactory {
    pks: Vec<i64>,
}

impl RetrieveResultsFactory {
    pub fn new() -> Self {
        Self { pks: Vec::new() }
    }

    pub fn with_pks(mut self, pks: &[i64]) -> Self {
        self.pks.extend_from_slice(pks);
        self
    }

    pub fn create(self) -> RetrieveResults {
        let column = |field_id, values: Vec<Value>| FieldData {
            field_id,
            field_name: String::new(),
            values,
        };
        RetrieveResults {
            all_retrieve_count: self.pks.len() as i64,
            fields_data: vec![
                column(PK_FIELD_ID, self.pks.iter().map(|pk| json!(pk)).collect()),
                column(AGE_FIELD_ID, self.pks.iter().map(|pk| json!(pk * 10)).collect()),
            ],
            ids: self.pks,
        }
    }
}
