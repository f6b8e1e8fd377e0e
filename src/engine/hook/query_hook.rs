use thiserror::Error;

use crate::engine::types::UniqueId;

#[derive(Debug, Error)]
#[error("{0}")]
pub struct HookError(pub String);

/// Inputs a hook may use to tune a vector search. `topk` and
/// `search_params` are written back into the plan after the hook runs.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryHookParams {
    pub topk: i64,
    pub search_params: String,
    /// Estimated number of sealed segments the search touches cluster-wide.
    pub segment_num: i64,
    pub with_filter: bool,
    pub collection_id: UniqueId,
}

/// Pluggable search-parameter optimizer.
pub trait QueryHook: Send + Sync {
    fn run(&self, params: &mut QueryHookParams) -> Result<(), HookError>;
}
