use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::{LOG_TARGET, RequestScope, until_cancelled};
use crate::engine::errors::QueryNodeError;
use crate::engine::scheduler::{QueryStreamTask, Task};
use crate::engine::segments::{QueryReducer, QueryStreamSink, create_internal_reducer};
use crate::engine::types::{QueryRequest, RetrieveResults};
use crate::node::QueryNode;
use crate::node::metrics::QUERY_LABEL;

impl QueryNode {
    /// Runs a query on the delegator of `channel` and reduces its results.
    pub async fn query_channel(
        &self,
        req: &QueryRequest,
        channel: &str,
        cancel: &CancellationToken,
    ) -> Result<RetrieveResults, QueryNodeError> {
        let scope = RequestScope::enter(&self.lifetime, cancel)?;
        let metrics = self.metrics.request(QUERY_LABEL);

        let collection_id = req.req.collection_id;
        debug!(
            target: LOG_TARGET,
            msg_id = req.req.base.msg_id,
            collection_id,
            channel,
            scope = ?req.scope,
            from_shard_leader = req.from_shard_leader,
            segment_ids = ?req.segment_ids,
            "Start query on channel"
        );

        let Some(delegator) = self.delegators.get(channel) else {
            let err = QueryNodeError::ChannelNotFound(channel.to_string());
            warn!(target: LOG_TARGET, channel, error = %err, "Query failed, no shard delegator for channel");
            return Err(err);
        };

        let results = until_cancelled(scope.token(), delegator.query(scope.token(), req))
            .await
            .inspect_err(|e| {
                warn!(target: LOG_TARGET, channel, error = %e, "Failed to query on delegator");
            })?;

        let Some(collection) = self.manager.collection.get(collection_id) else {
            let err = QueryNodeError::CollectionNotFound(collection_id);
            warn!(target: LOG_TARGET, channel, error = %err, "Query failed, collection not loaded");
            return Err(err);
        };

        let reducer = create_internal_reducer(req, collection.schema());
        let resp = reducer.reduce(results)?;

        debug!(
            target: LOG_TARGET,
            channel,
            rows = resp.len(),
            elapsed_ms = metrics.elapsed().as_millis() as u64,
            "Query on channel done"
        );
        metrics.success();
        Ok(resp)
    }

    /// Streams a query through the delegator of `channel` into `sink`.
    pub async fn query_channel_stream(
        &self,
        req: &QueryRequest,
        channel: &str,
        sink: Arc<dyn QueryStreamSink>,
        cancel: &CancellationToken,
    ) -> Result<(), QueryNodeError> {
        let scope = RequestScope::enter(&self.lifetime, cancel)?;
        let metrics = self.metrics.request(QUERY_LABEL);

        debug!(
            target: LOG_TARGET,
            msg_id = req.req.base.msg_id,
            collection_id = req.req.collection_id,
            channel,
            scope = ?req.scope,
            "Start streaming query on channel"
        );

        let Some(delegator) = self.delegators.get(channel) else {
            let err = QueryNodeError::ChannelNotFound(channel.to_string());
            warn!(target: LOG_TARGET, channel, error = %err, "Streaming query failed, no shard delegator for channel");
            return Err(err);
        };

        until_cancelled(
            scope.token(),
            delegator.query_stream(scope.token(), req, sink),
        )
        .await
        .inspect_err(|e| {
            warn!(target: LOG_TARGET, channel, error = %e, "Failed to stream query on delegator");
        })?;

        metrics.success();
        Ok(())
    }

    /// Streams the local segments of `req` through the task scheduler and
    /// blocks until the task finishes.
    pub async fn query_stream_segments(
        &self,
        req: QueryRequest,
        sink: Arc<dyn QueryStreamSink>,
        cancel: &CancellationToken,
    ) -> Result<(), QueryNodeError> {
        let scope = RequestScope::enter(&self.lifetime, cancel)?;
        let metrics = self.metrics.request(QUERY_LABEL);

        let collection_id = req.req.collection_id;
        let Some(collection) = self.manager.collection.get(collection_id) else {
            return Err(QueryNodeError::CollectionNotFound(collection_id));
        };

        let task = Arc::new(QueryStreamTask::new(
            scope.token().clone(),
            collection,
            Arc::clone(&self.manager),
            req,
            sink,
        ));

        if let Err(e) = self.scheduler.add(task.clone()) {
            warn!(target: LOG_TARGET, collection_id, error = %e, "Failed to add query task into scheduler");
            return Err(e.into());
        }

        if let Err(e) = task.wait().await {
            warn!(target: LOG_TARGET, collection_id, error = %e, "Failed to execute task by node scheduler");
            return Err(e);
        }

        metrics.success();
        Ok(())
    }
}
