use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry};
use std::time::{Duration, Instant};

use crate::engine::errors::QueryNodeError;

pub const QUERY_LABEL: &str = "query";
pub const SEARCH_LABEL: &str = "search";
pub const STATISTICS_LABEL: &str = "statistics";

pub const TOTAL_LABEL: &str = "total";
pub const SUCCESS_LABEL: &str = "success";
pub const FAIL_LABEL: &str = "fail";

pub const LEADER_LABEL: &str = "leader";

const LATENCY_BUCKETS_MS: &[f64] = &[
    1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0, 200.0, 500.0, 1000.0, 2000.0, 5000.0,
];
const NQ_BUCKETS: &[f64] = &[1.0, 2.0, 4.0, 8.0, 16.0, 32.0, 64.0, 128.0, 256.0, 512.0];
const TOPK_BUCKETS: &[f64] = &[1.0, 10.0, 50.0, 100.0, 500.0, 1000.0, 5000.0, 16384.0];

/// Request outcome metrics of one query node, kept in a node-local registry.
pub struct QueryNodeMetrics {
    registry: Registry,
    node_id: String,
    sq_count: IntCounterVec,
    sq_req_latency: HistogramVec,
    search_nq: HistogramVec,
    search_topk: HistogramVec,
}

impl QueryNodeMetrics {
    pub fn new(node_id: i64) -> Result<Self, QueryNodeError> {
        let registry = Registry::new();

        let sq_count = IntCounterVec::new(
            Opts::new(
                "query_node_sq_count",
                "Search and query requests handled, by outcome",
            ),
            &["node_id", "query_type", "status", "request_scope"],
        )?;
        let sq_req_latency = HistogramVec::new(
            HistogramOpts::new(
                "query_node_sq_req_latency_ms",
                "End-to-end latency of search and query requests in milliseconds",
            )
            .buckets(LATENCY_BUCKETS_MS.to_vec()),
            &["node_id", "query_type", "request_scope"],
        )?;
        let search_nq = HistogramVec::new(
            HistogramOpts::new("query_node_search_nq", "Number of queries per search")
                .buckets(NQ_BUCKETS.to_vec()),
            &["node_id"],
        )?;
        let search_topk = HistogramVec::new(
            HistogramOpts::new("query_node_search_topk", "Top-K per search")
                .buckets(TOPK_BUCKETS.to_vec()),
            &["node_id"],
        )?;

        registry.register(Box::new(sq_count.clone()))?;
        registry.register(Box::new(sq_req_latency.clone()))?;
        registry.register(Box::new(search_nq.clone()))?;
        registry.register(Box::new(search_topk.clone()))?;

        Ok(Self {
            registry,
            node_id: node_id.to_string(),
            sq_count,
            sq_req_latency,
            search_nq,
            search_topk,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Starts tracking one request: counts it as `total` now and as exactly
    /// one of `success`/`fail` later.
    pub fn request(&self, query_type: &'static str) -> RequestMetrics<'_> {
        self.inc(query_type, TOTAL_LABEL);
        RequestMetrics {
            metrics: self,
            query_type,
            started: Instant::now(),
            finished: false,
        }
    }

    pub fn sq_count(&self, query_type: &str, status: &str) -> u64 {
        self.sq_count
            .with_label_values(&[self.node_id.as_str(), query_type, status, LEADER_LABEL])
            .get()
    }

    pub fn latency_samples(&self, query_type: &str) -> u64 {
        self.sq_req_latency
            .with_label_values(&[self.node_id.as_str(), query_type, LEADER_LABEL])
            .get_sample_count()
    }

    pub fn search_nq_sum(&self) -> f64 {
        self.search_nq
            .with_label_values(&[self.node_id.as_str()])
            .get_sample_sum()
    }

    pub fn search_topk_sum(&self) -> f64 {
        self.search_topk
            .with_label_values(&[self.node_id.as_str()])
            .get_sample_sum()
    }

    fn inc(&self, query_type: &str, status: &str) {
        self.sq_count
            .with_label_values(&[self.node_id.as_str(), query_type, status, LEADER_LABEL])
            .inc();
    }

    fn observe_latency(&self, query_type: &str, latency: Duration) {
        self.sq_req_latency
            .with_label_values(&[self.node_id.as_str(), query_type, LEADER_LABEL])
            .observe(latency.as_secs_f64() * 1000.0);
    }

    fn observe_search(&self, nq: i64, topk: i64) {
        self.search_nq
            .with_label_values(&[self.node_id.as_str()])
            .observe(nq as f64);
        self.search_topk
            .with_label_values(&[self.node_id.as_str()])
            .observe(topk as f64);
    }
}

/// Per-request outcome recorder. Dropping it unfinished counts a failure.
pub struct RequestMetrics<'a> {
    metrics: &'a QueryNodeMetrics,
    query_type: &'static str,
    started: Instant,
    finished: bool,
}

impl RequestMetrics<'_> {
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn success(mut self) {
        self.finished = true;
        self.metrics
            .observe_latency(self.query_type, self.started.elapsed());
        self.metrics.inc(self.query_type, SUCCESS_LABEL);
    }

    pub fn search_success(mut self, nq: i64, topk: i64) {
        self.finished = true;
        self.metrics
            .observe_latency(self.query_type, self.started.elapsed());
        self.metrics.inc(self.query_type, SUCCESS_LABEL);
        self.metrics.observe_search(nq, topk);
    }
}

impl Drop for RequestMetrics<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.metrics.inc(self.query_type, FAIL_LABEL);
        }
    }
}
