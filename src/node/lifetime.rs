use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Notify;

use crate::engine::errors::QueryNodeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifetimeState {
    Initializing,
    Healthy,
    Stopping,
    Abnormal,
}

impl fmt::Display for LifetimeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifetimeState::Initializing => "Initializing",
            LifetimeState::Healthy => "Healthy",
            LifetimeState::Stopping => "Stopping",
            LifetimeState::Abnormal => "Abnormal",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
struct LifetimeInner {
    state: RwLock<LifetimeState>,
    in_flight: AtomicUsize,
    idle: Notify,
}

/// Node serving state plus a count of requests currently admitted.
#[derive(Debug, Clone)]
pub struct Lifetime {
    inner: Arc<LifetimeInner>,
}

impl Lifetime {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(LifetimeInner {
                state: RwLock::new(LifetimeState::Initializing),
                in_flight: AtomicUsize::new(0),
                idle: Notify::new(),
            }),
        }
    }

    pub fn state(&self) -> LifetimeState {
        *self.inner.state.read()
    }

    pub fn set_state(&self, state: LifetimeState) {
        *self.inner.state.write() = state;
    }

    /// Admits one request if the node is healthy.
    pub fn add(&self) -> Result<LifetimeGuard, QueryNodeError> {
        let state = self.inner.state.read();
        if *state != LifetimeState::Healthy {
            return Err(QueryNodeError::NotHealthy(*state));
        }
        self.inner.in_flight.fetch_add(1, Ordering::AcqRel);
        Ok(LifetimeGuard {
            inner: Arc::clone(&self.inner),
        })
    }

    pub fn in_flight(&self) -> usize {
        self.inner.in_flight.load(Ordering::Acquire)
    }

    /// Waits until no admitted request is running, or `timeout` elapses.
    /// Returns whether the node drained.
    pub async fn wait_idle(&self, timeout: Duration) -> bool {
        let drained = async {
            loop {
                let notified = self.inner.idle.notified();
                if self.in_flight() == 0 {
                    return;
                }
                notified.await;
            }
        };
        tokio::time::timeout(timeout, drained).await.is_ok()
    }
}

impl Default for Lifetime {
    fn default() -> Self {
        Self::new()
    }
}

/// Releases its admission when dropped.
#[derive(Debug)]
pub struct LifetimeGuard {
    inner: Arc<LifetimeInner>,
}

impl Drop for LifetimeGuard {
    fn drop(&mut self) {
        if self.inner.in_flight.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.inner.idle.notify_waiters();
        }
    }
}
