use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::sync::mpsc::{self, Receiver, Sender, error::TrySendError};
use tracing::{debug, info, warn};

use super::task::Task;
use crate::engine::errors::{QueryNodeError, SchedulerError};
use crate::shared::config::SchedulerConfig;

const LOG_TARGET: &str = "query_node::scheduler";

pub trait Scheduler: Send + Sync {
    /// Enqueues `task`; never blocks.
    fn add(&self, task: Arc<dyn Task>) -> Result<(), SchedulerError>;
}

/// Bounded-queue scheduler backed by a single dispatch loop.
pub struct TaskScheduler {
    tx: Mutex<Option<Sender<Arc<dyn Task>>>>,
    capacity: usize,
}

impl TaskScheduler {
    /// Spawns the dispatch loop on the current tokio runtime.
    pub fn start(queue_capacity: usize, max_concurrency: usize) -> Self {
        let capacity = queue_capacity.max(1);
        let (tx, rx) = mpsc::channel(capacity);
        let permits = Arc::new(Semaphore::new(max_concurrency.max(1)));

        tokio::spawn(run_dispatch_loop(rx, permits));
        info!(
            target: LOG_TARGET,
            queue_capacity = capacity,
            max_concurrency,
            "Task scheduler started"
        );

        Self {
            tx: Mutex::new(Some(tx)),
            capacity,
        }
    }

    pub fn from_config(cfg: &SchedulerConfig) -> Self {
        Self::start(cfg.queue_capacity, cfg.max_concurrency)
    }

    /// Stops accepting tasks. Queued tasks still run.
    pub fn stop(&self) {
        if self.tx.lock().take().is_some() {
            info!(target: LOG_TARGET, "Task scheduler stopping");
        }
    }
}

impl Scheduler for TaskScheduler {
    fn add(&self, task: Arc<dyn Task>) -> Result<(), SchedulerError> {
        let guard = self.tx.lock();
        let Some(tx) = guard.as_ref() else {
            return Err(SchedulerError::Stopped);
        };

        match tx.try_send(task) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(task)) => {
                warn!(target: LOG_TARGET, task = task.name(), "Task queue full");
                Err(SchedulerError::QueueFull(self.capacity))
            }
            Err(TrySendError::Closed(_)) => Err(SchedulerError::Stopped),
        }
    }
}

async fn run_dispatch_loop(mut rx: Receiver<Arc<dyn Task>>, permits: Arc<Semaphore>) {
    while let Some(task) = rx.recv().await {
        let Ok(permit) = Arc::clone(&permits).acquire_owned().await else {
            break;
        };

        debug!(target: LOG_TARGET, task = task.name(), "Dispatching task");
        tokio::spawn(async move {
            let running = Arc::clone(&task);
            let result = match tokio::spawn(async move { running.execute().await }).await {
                Ok(result) => result,
                Err(e) => Err(QueryNodeError::Task(format!("task {} aborted: {e}", task.name()))),
            };
            task.done(result);
            drop(permit);
        });
    }

    info!(target: LOG_TARGET, "Task scheduler dispatch loop exited");
}
