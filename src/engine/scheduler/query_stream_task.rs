use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::task::{Task, TaskCompletion};
use crate::engine::errors::QueryNodeError;
use crate::engine::segments::{Collection, Manager, QueryStreamSink, SegmentType};
use crate::engine::types::QueryRequest;

const LOG_TARGET: &str = "query_node::scheduler";

/// Streams the rows of every segment in the request's scope to a sink,
/// one result batch per segment.
pub struct QueryStreamTask {
    cancel: CancellationToken,
    collection: Arc<Collection>,
    manager: Arc<Manager>,
    req: QueryRequest,
    sink: Arc<dyn QueryStreamSink>,
    completion: TaskCompletion,
}

impl QueryStreamTask {
    pub fn new(
        cancel: CancellationToken,
        collection: Arc<Collection>,
        manager: Arc<Manager>,
        req: QueryRequest,
        sink: Arc<dyn QueryStreamSink>,
    ) -> Self {
        Self {
            cancel,
            collection,
            manager,
            req,
            sink,
            completion: TaskCompletion::new(),
        }
    }
}

#[async_trait]
impl Task for QueryStreamTask {
    fn name(&self) -> &'static str {
        "query_stream"
    }

    async fn execute(&self) -> Result<(), QueryNodeError> {
        let schema = self.collection.schema();

        for segment_type in SegmentType::for_scope(self.req.scope) {
            let pinned = self.manager.segment.pin(
                *segment_type,
                self.collection.id(),
                &self.req.req.partition_ids,
                &self.req.segment_ids,
            );

            for segment in pinned.segments() {
                if self.cancel.is_cancelled() {
                    return Err(QueryNodeError::Cancelled);
                }

                let mut result = segment.retrieve(self.req.req.limit);
                if result.is_empty() {
                    continue;
                }
                for field in result.fields_data.iter_mut() {
                    if let Some(name) = schema.field_name(field.field_id) {
                        field.field_name = name.to_string();
                    }
                }

                debug!(
                    target: LOG_TARGET,
                    segment_id = segment.id(),
                    rows = result.len(),
                    "Streaming segment rows"
                );
                tokio::select! {
                    biased;
                    _ = self.cancel.cancelled() => return Err(QueryNodeError::Cancelled),
                    sent = self.sink.send(result) => sent?,
                }
            }
        }

        Ok(())
    }

    fn done(&self, result: Result<(), QueryNodeError>) {
        self.completion.complete(result);
    }

    async fn wait(&self) -> Result<(), QueryNodeError> {
        self.completion.wait().await
    }
}
