use indexmap::IndexMap;
use std::collections::HashSet;

use super::collection::CollectionSchema;
use crate::engine::errors::QueryNodeError;
use crate::engine::types::{FieldData, QueryRequest, RetrieveResults, SearchHit, SearchResults};

/// Merges per-segment or per-shard search results into one ranked result.
pub trait SearchReducer: Send + Sync {
    fn reduce(
        &self,
        results: Vec<SearchResults>,
        nq: i64,
        topk: i64,
        metric_type: &str,
    ) -> Result<SearchResults, QueryNodeError>;
}

/// Merges retrieve results of one query into a single result.
pub trait QueryReducer: Send + Sync {
    fn reduce(&self, results: Vec<RetrieveResults>) -> Result<RetrieveResults, QueryNodeError>;
}

/// Keeps the best `topk` distinct ids per query.
#[derive(Debug, Default, Clone, Copy)]
pub struct TopKSearchReducer;

impl TopKSearchReducer {
    /// Similarity metrics rank higher scores first; distance metrics lower first.
    fn higher_is_better(metric_type: &str) -> bool {
        matches!(
            metric_type.to_ascii_uppercase().as_str(),
            "IP" | "COSINE" | "BM25"
        )
    }
}

impl SearchReducer for TopKSearchReducer {
    fn reduce(
        &self,
        results: Vec<SearchResults>,
        nq: i64,
        topk: i64,
        metric_type: &str,
    ) -> Result<SearchResults, QueryNodeError> {
        let nq_len = usize::try_from(nq)
            .map_err(|_| QueryNodeError::Reduce(format!("invalid nq {nq}")))?;
        let topk_len = usize::try_from(topk)
            .map_err(|_| QueryNodeError::Reduce(format!("invalid topk {topk}")))?;

        let mut per_query: Vec<Vec<SearchHit>> = vec![Vec::new(); nq_len];
        let mut sealed_segment_ids_searched = Vec::new();
        let mut channel_ids_searched = Vec::new();

        for partial in results {
            if partial.hits.len() != nq_len {
                return Err(QueryNodeError::Reduce(format!(
                    "partial result carries {} queries, expected {nq}",
                    partial.hits.len()
                )));
            }
            for (merged, hits) in per_query.iter_mut().zip(partial.hits) {
                merged.extend(hits);
            }
            sealed_segment_ids_searched.extend(partial.sealed_segment_ids_searched);
            channel_ids_searched.extend(partial.channel_ids_searched);
        }

        let descending = Self::higher_is_better(metric_type);
        for hits in per_query.iter_mut() {
            hits.sort_by(|a, b| {
                let ord = a.score.total_cmp(&b.score);
                let ord = if descending { ord.reverse() } else { ord };
                ord.then_with(|| a.id.cmp(&b.id))
            });
            let mut seen = HashSet::with_capacity(hits.len());
            hits.retain(|hit| seen.insert(hit.id));
            hits.truncate(topk_len);
        }

        Ok(SearchResults {
            nq,
            topk,
            metric_type: metric_type.to_string(),
            hits: per_query,
            sealed_segment_ids_searched,
            channel_ids_searched,
        })
    }
}

/// Concatenates retrieve results, dropping duplicate primary keys.
#[derive(Debug, Clone)]
pub struct InternalQueryReducer {
    limit: Option<usize>,
    field_names: IndexMap<i64, String>,
}

impl InternalQueryReducer {
    pub fn new(limit: i64, schema: &CollectionSchema) -> Self {
        Self {
            limit: usize::try_from(limit).ok().filter(|limit| *limit > 0),
            field_names: schema
                .fields
                .iter()
                .map(|field| (field.field_id, field.name.clone()))
                .collect(),
        }
    }
}

pub fn create_internal_reducer(
    req: &QueryRequest,
    schema: &CollectionSchema,
) -> InternalQueryReducer {
    InternalQueryReducer::new(req.req.limit, schema)
}

impl QueryReducer for InternalQueryReducer {
    fn reduce(&self, results: Vec<RetrieveResults>) -> Result<RetrieveResults, QueryNodeError> {
        let mut ids = Vec::new();
        let mut columns: IndexMap<i64, Vec<serde_json::Value>> = IndexMap::new();
        let mut seen = HashSet::new();
        let mut all_retrieve_count = 0;
        let mut output_fields: Option<Vec<i64>> = None;

        'results: for partial in results {
            all_retrieve_count += partial.all_retrieve_count;
            for field in &partial.fields_data {
                if field.values.len() != partial.ids.len() {
                    return Err(QueryNodeError::Reduce(format!(
                        "field {} has {} values for {} ids",
                        field.field_id,
                        field.values.len(),
                        partial.ids.len()
                    )));
                }
            }

            if !partial.ids.is_empty() {
                let fields: Vec<i64> = partial.fields_data.iter().map(|f| f.field_id).collect();
                match &output_fields {
                    Some(expected) if *expected != fields => {
                        return Err(QueryNodeError::Reduce(format!(
                            "mismatched output fields {fields:?}, expected {expected:?}"
                        )));
                    }
                    Some(_) => {}
                    None => {
                        for field_id in &fields {
                            columns.entry(*field_id).or_default();
                        }
                        output_fields = Some(fields);
                    }
                }
            }

            for (row, pk) in partial.ids.iter().enumerate() {
                if self.limit.is_some_and(|limit| ids.len() >= limit) {
                    break 'results;
                }
                if !seen.insert(*pk) {
                    continue;
                }
                ids.push(*pk);
                for field in &partial.fields_data {
                    columns
                        .entry(field.field_id)
                        .or_default()
                        .push(field.values[row].clone());
                }
            }
        }

        let fields_data = columns
            .into_iter()
            .map(|(field_id, values)| FieldData {
                field_id,
                field_name: self.field_names.get(&field_id).cloned().unwrap_or_default(),
                values,
            })
            .collect();

        Ok(RetrieveResults {
            ids,
            fields_data,
            all_retrieve_count,
        })
    }
}
