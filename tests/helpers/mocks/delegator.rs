use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::engine::delegator::{SegmentEntry, ShardDelegator, SnapshotItem};
use crate::engine::errors::QueryNodeError;
use crate::engine::segments::QueryStreamSink;
use crate::engine::types::{
    GetStatisticsRequest, QueryRequest, RetrieveResults, SearchRequest, SearchResults,
    SegmentLoadInfo, StatisticsResponse, UniqueId,
};

/// Delegator returning canned results and recording what it was asked.
pub struct MockDelegator {
    channel: String,
    collection_id: UniqueId,
    search_results: Vec<SearchResults>,
    query_results: Vec<RetrieveResults>,
    statistics: Vec<StatisticsResponse>,
    sealed: Vec<SnapshotItem>,
    growing: Vec<SegmentEntry>,
    error: Option<String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    searched: Mutex<Vec<SearchRequest>>,
    loaded: Mutex<Vec<(Vec<SegmentLoadInfo>, i64)>>,
    tokens: Mutex<Vec<CancellationToken>>,
}

impl MockDelegator {
    pub fn new(channel: &str) -> Self {
        Self {
            channel: channel.to_string(),
            collection_id: 1,
            search_results: Vec::new(),
            query_results: Vec::new(),
            statistics: Vec::new(),
            sealed: Vec::new(),
            growing: Vec::new(),
            error: None,
            delay: None,
            calls: AtomicUsize::new(0),
            searched: Mutex::new(Vec::new()),
            loaded: Mutex::new(Vec::new()),
            tokens: Mutex::new(Vec::new()),
        }
    }

    pub fn with_collection_id(mut self, collection_id: UniqueId) -> Self {
        self.collection_id = collection_id;
        self
    }

    pub fn with_search_results(mut self, results: Vec<SearchResults>) -> Self {
        self.search_results = results;
        self
    }

    pub fn with_query_results(mut self, results: Vec<RetrieveResults>) -> Self {
        self.query_results = results;
        self
    }

    pub fn with_statistics(mut self, statistics: Vec<StatisticsResponse>) -> Self {
        self.statistics = statistics;
        self
    }

    /// Sealed distribution: one snapshot per `(node_id, segment count)`.
    pub fn with_sealed(mut self, nodes: &[(i64, usize)]) -> Self {
        self.sealed = nodes
            .iter()
            .map(|(node_id, count)| SnapshotItem {
                node_id: *node_id,
                segments: (0..*count)
                    .map(|i| SegmentEntry {
                        node_id: *node_id,
                        segment_id: node_id * 1000 + i as i64,
                        partition_id: 1,
                        version: 1,
                    })
                    .collect(),
            })
            .collect();
        self
    }

    pub fn with_growing(mut self, count: usize) -> Self {
        self.growing = (0..count)
            .map(|i| SegmentEntry {
                node_id: 1,
                segment_id: 9000 + i as i64,
                partition_id: 1,
                version: 1,
            })
            .collect();
        self
    }

    /// Every call fails with a delegator error carrying `reason`.
    pub fn failing(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }

    /// Every call sleeps for `delay` first, ignoring its token.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn searched(&self) -> Vec<SearchRequest> {
        self.searched.lock().clone()
    }

    pub fn loaded(&self) -> Vec<(Vec<SegmentLoadInfo>, i64)> {
        self.loaded.lock().clone()
    }

    /// Tokens received by every call, in call order.
    pub fn tokens(&self) -> Vec<CancellationToken> {
        self.tokens.lock().clone()
    }

    async fn enter(&self, cancel: &CancellationToken) -> Result<(), QueryNodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.tokens.lock().push(cancel.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.error {
            Some(reason) => Err(QueryNodeError::Delegator(reason.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ShardDelegator for MockDelegator {
    fn channel(&self) -> &str {
        &self.channel
    }

    fn collection_id(&self) -> UniqueId {
        self.collection_id
    }

    async fn load_growing(
        &self,
        cancel: &CancellationToken,
        infos: Vec<SegmentLoadInfo>,
        version: i64,
    ) -> Result<(), QueryNodeError> {
        self.loaded.lock().push((infos, version));
        self.enter(cancel).await
    }

    async fn query(
        &self,
        cancel: &CancellationToken,
        _req: &QueryRequest,
    ) -> Result<Vec<RetrieveResults>, QueryNodeError> {
        self.enter(cancel).await?;
        Ok(self.query_results.clone())
    }

    async fn query_stream(
        &self,
        cancel: &CancellationToken,
        _req: &QueryRequest,
        sink: Arc<dyn QueryStreamSink>,
    ) -> Result<(), QueryNodeError> {
        self.enter(cancel).await?;
        for result in &self.query_results {
            sink.send(result.clone()).await?;
        }
        Ok(())
    }

    async fn search(
        &self,
        cancel: &CancellationToken,
        req: &SearchRequest,
    ) -> Result<Vec<SearchResults>, QueryNodeError> {
        self.searched.lock().push(req.clone());
        self.enter(cancel).await?;
        Ok(self.search_results.clone())
    }

    async fn get_statistics(
        &self,
        cancel: &CancellationToken,
        _req: &GetStatisticsRequest,
    ) -> Result<Vec<StatisticsResponse>, QueryNodeError> {
        self.enter(cancel).await?;
        Ok(self.statistics.clone())
    }

    fn get_segment_info(&self, _readable: bool) -> (Vec<SnapshotItem>, Vec<SegmentEntry>) {
        (self.sealed.clone(), self.growing.clone())
    }
}
