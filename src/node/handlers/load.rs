use std::collections::HashSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::LOG_TARGET;
use crate::engine::delegator::ShardDelegator;
use crate::engine::errors::QueryNodeError;
use crate::engine::types::{LoadScope, LoadSegmentsRequest, SegmentLoadInfo, WatchDmChannelsRequest};
use crate::node::QueryNode;
use crate::shared::response::Status;

/// How a batch loader reacts to a per-segment failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadFailurePolicy {
    /// Keep loading the remaining segments and report the first error.
    ContinueOnError,
    /// Stop at the first error and report it.
    FailFast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SealedLoadStep {
    DeltaLogs,
    Index,
}

/// Unflushed segments of a watch request that carry data.
///
/// Segments missing from `segment_infos` or without binlogs are skipped;
/// each segment ID contributes at most one entry.
pub fn collect_growing_segments(req: &WatchDmChannelsRequest) -> Vec<SegmentLoadInfo> {
    let mut seen = HashSet::new();
    let mut growing = Vec::new();

    for info in &req.infos {
        for segment_id in &info.unflushed_segment_ids {
            if !seen.insert(*segment_id) {
                continue;
            }
            let Some(segment_info) = req.segment_infos.get(segment_id) else {
                warn!(
                    target: LOG_TARGET,
                    segment_id,
                    "Unflushed segment not found in segment infos"
                );
                continue;
            };
            if segment_info.binlogs.is_empty() {
                info!(
                    target: LOG_TARGET,
                    segment_id = segment_info.id,
                    "Skip segment with empty binlogs"
                );
                continue;
            }
            growing.push(SegmentLoadInfo::from(segment_info));
        }
    }

    growing
}

/// Hands the growing segments of `req` to the channel's delegator.
pub async fn load_growing_segments(
    cancel: &CancellationToken,
    delegator: &dyn ShardDelegator,
    req: &WatchDmChannelsRequest,
) -> Result<(), QueryNodeError> {
    let growing = collect_growing_segments(req);
    debug!(
        target: LOG_TARGET,
        channel = delegator.channel(),
        segments = growing.len(),
        version = req.version,
        "Loading growing segments"
    );
    delegator.load_growing(cancel, growing, req.version).await
}

impl QueryNode {
    /// Loads the growing segments of a newly watched channel into its delegator.
    pub async fn watch_channel(
        &self,
        req: &WatchDmChannelsRequest,
        cancel: &CancellationToken,
    ) -> Status {
        let _admission = match self.lifetime.add() {
            Ok(guard) => guard,
            Err(e) => return Status::from_error(&e),
        };

        let Some(channel) = req.channel() else {
            let err = QueryNodeError::invalid_parameter("one channel info", "none");
            warn!(target: LOG_TARGET, collection_id = req.collection_id, error = %err, "Watch request without channel");
            return Status::from_error(&err);
        };

        let Some(delegator) = self.delegators.get(channel) else {
            let err = QueryNodeError::ChannelNotFound(channel.to_string());
            warn!(target: LOG_TARGET, channel, error = %err, "No delegator registered for watched channel");
            return Status::from_error(&err);
        };

        match load_growing_segments(cancel, delegator.as_ref(), req).await {
            Ok(()) => Status::success(),
            Err(e) => {
                warn!(target: LOG_TARGET, channel, error = %e, "Failed to load growing segments");
                Status::from_error(&e)
            }
        }
    }

    /// Entry point for load commands; dispatches on the request's load scope.
    pub async fn load_segments(
        &self,
        req: &LoadSegmentsRequest,
        cancel: &CancellationToken,
    ) -> Status {
        let _admission = match self.lifetime.add() {
            Ok(guard) => guard,
            Err(e) => return Status::from_error(&e),
        };

        info!(
            target: LOG_TARGET,
            collection_id = req.collection_id,
            scope = ?req.load_scope,
            segments = req.infos.len(),
            "Received load segments request"
        );

        match req.load_scope {
            LoadScope::Delta => self.load_delta_logs(req, cancel).await,
            LoadScope::Index => self.load_index(req, cancel).await,
            LoadScope::Full => {
                match self
                    .loader
                    .load_segments(cancel, req.collection_id, &req.infos, req.version)
                    .await
                {
                    Ok(loaded) => {
                        info!(target: LOG_TARGET, collection_id = req.collection_id, loaded = ?loaded, "Segments loaded");
                        Status::success()
                    }
                    Err(e) => {
                        let err = QueryNodeError::from(e);
                        warn!(target: LOG_TARGET, collection_id = req.collection_id, error = %err, "Failed to load segments");
                        Status::from_error(&err)
                    }
                }
            }
        }
    }

    /// Loads delta logs for every local sealed segment of `req`.
    ///
    /// A failing segment does not stop the others; the first error is reported.
    pub async fn load_delta_logs(
        &self,
        req: &LoadSegmentsRequest,
        cancel: &CancellationToken,
    ) -> Status {
        self.load_sealed(
            req,
            cancel,
            SealedLoadStep::DeltaLogs,
            LoadFailurePolicy::ContinueOnError,
        )
        .await
    }

    /// Loads indexes for the local sealed segments of `req`, stopping at the
    /// first failure.
    pub async fn load_index(&self, req: &LoadSegmentsRequest, cancel: &CancellationToken) -> Status {
        info!(
            target: LOG_TARGET,
            collection_id = req.collection_id,
            segment_ids = ?req.infos.iter().map(|info| info.segment_id).collect::<Vec<_>>(),
            "Start to load index"
        );
        self.load_sealed(
            req,
            cancel,
            SealedLoadStep::Index,
            LoadFailurePolicy::FailFast,
        )
        .await
    }

    async fn load_sealed(
        &self,
        req: &LoadSegmentsRequest,
        cancel: &CancellationToken,
        step: SealedLoadStep,
        policy: LoadFailurePolicy,
    ) -> Status {
        let mut first_err: Option<QueryNodeError> = None;

        for info in &req.infos {
            let segment_id = info.segment_id;
            let Some(segment) = self.manager.segment.get_sealed(segment_id) else {
                debug!(target: LOG_TARGET, segment_id, ?step, "Segment not found, skipping");
                continue;
            };
            let Some(local) = segment.as_local() else {
                debug!(target: LOG_TARGET, segment_id, ?step, "Segment is not local, skipping");
                continue;
            };

            let result = match step {
                SealedLoadStep::DeltaLogs => {
                    self.loader
                        .load_delta_logs(cancel, local, &info.deltalogs)
                        .await
                }
                SealedLoadStep::Index => {
                    self.loader
                        .load_index(cancel, local, info, req.version)
                        .await
                }
            };

            if let Err(e) = result {
                warn!(target: LOG_TARGET, segment_id, ?step, error = %e, "Segment load step failed");
                if first_err.is_none() {
                    first_err = Some(QueryNodeError::from(e));
                }
                if policy == LoadFailurePolicy::FailFast {
                    break;
                }
            }
        }

        match first_err {
            Some(err) => {
                warn!(
                    target: LOG_TARGET,
                    collection_id = req.collection_id,
                    ?step,
                    error = %err,
                    "Failed to load segments"
                );
                Status::from_error(&err)
            }
            None => Status::success(),
        }
    }
}
