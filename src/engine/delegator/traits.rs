use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::engine::errors::QueryNodeError;
use crate::engine::segments::QueryStreamSink;
use crate::engine::types::{
    GetStatisticsRequest, QueryRequest, RetrieveResults, SearchRequest, SearchResults,
    SegmentLoadInfo, StatisticsResponse, UniqueId,
};

/// A segment as tracked by a delegator's distribution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentEntry {
    pub node_id: i64,
    pub segment_id: UniqueId,
    pub partition_id: UniqueId,
    pub version: i64,
}

/// Segments served by one worker node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotItem {
    pub node_id: i64,
    pub segments: Vec<SegmentEntry>,
}

/// Owner of query execution for one channel.
///
/// Every call receives the request's cancellation token; implementations
/// must stop any nested fan-out once it fires.
#[async_trait]
pub trait ShardDelegator: Send + Sync {
    fn channel(&self) -> &str;

    fn collection_id(&self) -> UniqueId;

    async fn load_growing(
        &self,
        cancel: &CancellationToken,
        infos: Vec<SegmentLoadInfo>,
        version: i64,
    ) -> Result<(), QueryNodeError>;

    async fn query(
        &self,
        cancel: &CancellationToken,
        req: &QueryRequest,
    ) -> Result<Vec<RetrieveResults>, QueryNodeError>;

    async fn query_stream(
        &self,
        cancel: &CancellationToken,
        req: &QueryRequest,
        sink: Arc<dyn QueryStreamSink>,
    ) -> Result<(), QueryNodeError>;

    async fn search(
        &self,
        cancel: &CancellationToken,
        req: &SearchRequest,
    ) -> Result<Vec<SearchResults>, QueryNodeError>;

    async fn get_statistics(
        &self,
        cancel: &CancellationToken,
        req: &GetStatisticsRequest,
    ) -> Result<Vec<StatisticsResponse>, QueryNodeError>;

    /// Sealed snapshots per worker node and the growing segments.
    /// `readable` restricts the view to segments currently serving reads.
    fn get_segment_info(&self, readable: bool) -> (Vec<SnapshotItem>, Vec<SegmentEntry>);
}
