use std::num::ParseIntError;
use thiserror::Error;

use crate::node::lifetime::LifetimeState;
use crate::shared::response::StatusCode;

/// Errors surfaced by the request pipeline and the load orchestrator.
#[derive(Debug, Error)]
pub enum QueryNodeError {
    #[error("channel not found: {0}")]
    ChannelNotFound(String),

    #[error("collection not found: {0}")]
    CollectionNotFound(i64),

    #[error("invalid parameter: expected {expected}, actual {actual}")]
    InvalidParameter { expected: String, actual: String },

    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("node is not serving, state: {0}")]
    NotHealthy(LifetimeState),

    #[error("request cancelled")]
    Cancelled,

    #[error("delegator error: {0}")]
    Delegator(String),

    #[error("scheduler rejected task: {0}")]
    Scheduler(#[from] SchedulerError),

    #[error("task failed: {0}")]
    Task(String),

    #[error("stream send failed: {0}")]
    Stream(String),

    #[error("reduce failed: {0}")]
    Reduce(String),

    #[error("unknown statistic field: {0}")]
    UnknownStatisticField(String),

    #[error("invalid value {value:?} for statistic field {field}: {source}")]
    ParseStatistic {
        field: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("segment load failed: {0}")]
    Load(#[from] LoadError),

    #[error("metrics registration failed: {0}")]
    Metrics(#[from] prometheus::Error),
}

impl QueryNodeError {
    pub fn invalid_parameter(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        QueryNodeError::InvalidParameter {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            QueryNodeError::ChannelNotFound(_) | QueryNodeError::CollectionNotFound(_) => {
                StatusCode::NotFound
            }
            QueryNodeError::InvalidParameter { .. } => StatusCode::InvalidParameter,
            QueryNodeError::ServiceUnavailable(_) | QueryNodeError::Scheduler(_) => {
                StatusCode::ServiceUnavailable
            }
            QueryNodeError::NotHealthy(_) => StatusCode::NotReady,
            QueryNodeError::Cancelled => StatusCode::Cancelled,
            QueryNodeError::Load(LoadError::Cancelled) => StatusCode::Cancelled,
            _ => StatusCode::UnexpectedError,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code() == StatusCode::NotFound
    }
}

/// Failures reported by the storage collaborator while loading segment data.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("corrupted log {path}: {reason}")]
    Corrupted { path: String, reason: String },

    #[error("index load failed for segment {segment_id}: {reason}")]
    Index { segment_id: i64, reason: String },

    #[error("load cancelled")]
    Cancelled,

    #[error("Other error: {0}")]
    Other(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("task queue is full (capacity {0})")]
    QueueFull(usize),

    #[error("scheduler stopped")]
    Stopped,
}
