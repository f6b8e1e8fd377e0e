use async_trait::async_trait;
use tokio::sync::mpsc::Sender;

use crate::engine::errors::QueryNodeError;
use crate::engine::types::RetrieveResults;

/// Receiving end of a streaming query.
#[async_trait]
pub trait QueryStreamSink: Send + Sync {
    async fn send(&self, result: RetrieveResults) -> Result<(), QueryNodeError>;
}

/// Sink that forwards every result batch into a bounded channel.
pub struct ChannelStreamSink {
    tx: Sender<RetrieveResults>,
}

impl ChannelStreamSink {
    pub fn new(tx: Sender<RetrieveResults>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl QueryStreamSink for ChannelStreamSink {
    async fn send(&self, result: RetrieveResults) -> Result<(), QueryNodeError> {
        self.tx
            .send(result)
            .await
            .map_err(|_| QueryNodeError::Stream("stream receiver closed".to_string()))
    }
}
