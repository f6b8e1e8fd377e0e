use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::oneshot;

use crate::engine::errors::QueryNodeError;

/// Unit of work run by a [`Scheduler`](super::Scheduler).
///
/// The scheduler calls `execute` once and reports its outcome through
/// `done`; the submitter blocks on `wait`.
#[async_trait]
pub trait Task: Send + Sync {
    fn name(&self) -> &'static str;

    async fn execute(&self) -> Result<(), QueryNodeError>;

    fn done(&self, result: Result<(), QueryNodeError>);

    async fn wait(&self) -> Result<(), QueryNodeError>;
}

/// One-shot completion signal shared by a task and its submitter.
pub struct TaskCompletion {
    tx: Mutex<Option<oneshot::Sender<Result<(), QueryNodeError>>>>,
    rx: Mutex<Option<oneshot::Receiver<Result<(), QueryNodeError>>>>,
}

impl TaskCompletion {
    pub fn new() -> Self {
        let (tx, rx) = oneshot::channel();
        Self {
            tx: Mutex::new(Some(tx)),
            rx: Mutex::new(Some(rx)),
        }
    }

    /// Publishes the outcome; later calls are ignored.
    pub fn complete(&self, result: Result<(), QueryNodeError>) {
        if let Some(tx) = self.tx.lock().take() {
            let _ = tx.send(result);
        }
    }

    pub async fn wait(&self) -> Result<(), QueryNodeError> {
        let rx = self
            .rx
            .lock()
            .take()
            .ok_or_else(|| QueryNodeError::Task("task already awaited".to_string()))?;
        match rx.await {
            Ok(result) => result,
            Err(_) => Err(QueryNodeError::Task(
                "task dropped before completion".to_string(),
            )),
        }
    }
}

impl Default for TaskCompletion {
    fn default() -> Self {
        Self::new()
    }
}
