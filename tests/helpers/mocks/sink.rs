use async_trait::async_trait;
use parking_lot::Mutex;

use crate::engine::errors::QueryNodeError;
use crate::engine::segments::QueryStreamSink;
use crate::engine::types::RetrieveResults;

#[derive(Default)]
pub struct RecordingSink {
    received: Mutex<Vec<RetrieveResults>>,
    closed: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose receiver has gone away.
    pub fn closed() -> Self {
        Self {
            received: Mutex::new(Vec::new()),
            closed: true,
        }
    }

    pub fn received(&self) -> Vec<RetrieveResults> {
        self.received.lock().clone()
    }

    pub fn ids(&self) -> Vec<i64> {
        self.received
            .lock()
            .iter()
            .flat_map(|result| result.ids.iter().copied())
            .collect()
    }
}

#[async_trait]
impl QueryStreamSink for RecordingSink {
    async fn send(&self, result: RetrieveResults) -> Result<(), QueryNodeError> {
        if self.closed {
            return Err(QueryNodeError::Stream("receiver closed".to_string()));
        }
        self.received.lock().push(result);
        Ok(())
    }
}
