use tracing::{debug, warn};

use super::LOG_TARGET;
use crate::engine::delegator::ShardDelegator;
use crate::engine::errors::QueryNodeError;
use crate::engine::hook::QueryHookParams;
use crate::engine::plan::{PlanNode, plan_node, rewrite_query_info};
use crate::engine::types::SearchRequest;
use crate::node::QueryNode;

impl QueryNode {
    /// Lets the configured query hook rewrite `topk` and the index search
    /// parameters of a vector search plan.
    ///
    /// Without a hook, or for plans that are not vector searches, the request
    /// is returned untouched.
    pub(crate) fn optimize_search_params(
        &self,
        mut req: SearchRequest,
        delegator: &dyn ShardDelegator,
    ) -> Result<SearchRequest, QueryNodeError> {
        let Some(hook) = &self.query_hook else {
            return Ok(req);
        };

        let collection_id = req.req.collection_id;
        let Some(serialized_plan) = req.req.serialized_expr_plan.as_deref() else {
            warn!(target: LOG_TARGET, collection_id, "Serialized plan not found");
            return Err(QueryNodeError::invalid_parameter(
                "serialized search plan",
                "nil",
            ));
        };

        // unknown fan-out; assume a single channel
        let channel_num = if req.total_channel_num <= 0 {
            1
        } else {
            i64::from(req.total_channel_num)
        };

        let plan = PlanNode::decode_plan(serialized_plan).inspect_err(|e| {
            warn!(target: LOG_TARGET, collection_id, error = %e, "Failed to unmarshal plan");
        })?;

        let node_type = plan.kind();
        let Some(plan_node::Node::VectorAnns(vector_anns)) = plan.node.as_ref() else {
            warn!(
                target: LOG_TARGET,
                collection_id,
                node_type,
                "Not supported node type"
            );
            return Ok(req);
        };

        // growing segments are always brute-forced, so only sealed ones count
        let (sealed, _) = delegator.get_segment_info(true);
        let sealed_num: usize = sealed.iter().map(|item| item.segments.len()).sum();
        let with_filter = vector_anns.predicates.is_some();
        let query_info = vector_anns.query_info.clone().unwrap_or_default();

        let mut params = QueryHookParams {
            topk: query_info.topk,
            search_params: query_info.search_params,
            segment_num: sealed_num as i64 * channel_num,
            with_filter,
            collection_id,
        };

        hook.run(&mut params).map_err(|e| {
            warn!(target: LOG_TARGET, collection_id, error = %e, "Failed to execute query hook");
            QueryNodeError::ServiceUnavailable(format!("query hook execution failed: {e}"))
        })?;

        debug!(
            target: LOG_TARGET,
            collection_id,
            topk = params.topk,
            search_params = %params.search_params,
            estimated_segments = params.segment_num,
            "Optimized search params"
        );

        // only the hooked values change; unmodelled plan fields pass through
        let optimized = rewrite_query_info(serialized_plan, params.topk, &params.search_params)
            .inspect_err(|e| {
                warn!(target: LOG_TARGET, collection_id, error = %e, "Failed to marshal optimized plan");
            })?;
        req.req.serialized_expr_plan = Some(optimized);
        Ok(req)
    }
}
