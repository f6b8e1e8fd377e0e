use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::{LOG_TARGET, RequestScope, until_cancelled};
use crate::engine::errors::QueryNodeError;
use crate::engine::types::{SearchRequest, SearchResults};
use crate::node::QueryNode;
use crate::node::metrics::SEARCH_LABEL;

impl QueryNode {
    /// Searches `channel` through its delegator and reduces the partial
    /// results to the request's `topk`.
    pub async fn search_channel(
        &self,
        req: SearchRequest,
        channel: &str,
        cancel: &CancellationToken,
    ) -> Result<SearchResults, QueryNodeError> {
        let scope = RequestScope::enter(&self.lifetime, cancel)?;
        let metrics = self.metrics.request(SEARCH_LABEL);

        debug!(
            target: LOG_TARGET,
            msg_id = req.req.base.msg_id,
            collection_id = req.req.collection_id,
            channel,
            scope = ?req.scope,
            from_shard_leader = req.from_shard_leader,
            segment_ids = ?req.segment_ids,
            "Start to search channel"
        );

        let Some(delegator) = self.delegators.get(channel) else {
            let err = QueryNodeError::ChannelNotFound(channel.to_string());
            warn!(target: LOG_TARGET, channel, error = %err, "Search failed, no shard delegator for channel");
            return Err(err);
        };

        let req = self
            .optimize_search_params(req, delegator.as_ref())
            .inspect_err(|e| {
                warn!(target: LOG_TARGET, channel, error = %e, "Failed to optimize search params");
            })?;

        let results = until_cancelled(scope.token(), delegator.search(scope.token(), &req))
            .await
            .inspect_err(|e| {
                warn!(target: LOG_TARGET, channel, error = %e, "Failed to search on delegator");
            })?;

        let (nq, topk) = (req.req.nq, req.req.topk);
        let resp = self
            .search_reducer
            .reduce(results, nq, topk, &req.req.metric_type)?;

        debug!(
            target: LOG_TARGET,
            channel,
            nq,
            topk,
            elapsed_ms = metrics.elapsed().as_millis() as u64,
            "Search on channel done"
        );
        metrics.search_success(nq, topk);
        Ok(resp)
    }
}
