use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use super::lifetime::{Lifetime, LifetimeState};
use super::metrics::QueryNodeMetrics;
use crate::engine::delegator::DelegatorDirectory;
use crate::engine::errors::QueryNodeError;
use crate::engine::hook::{ParamOverrideHook, QueryHook};
use crate::engine::scheduler::{Scheduler, TaskScheduler};
use crate::engine::segments::{Manager, SearchReducer, SegmentLoader, TopKSearchReducer};
use crate::shared::config::Settings;

const LOG_TARGET: &str = "query_node::node";

/// Serves search, query and statistics requests for the channels whose
/// delegators are registered on this node.
pub struct QueryNode {
    pub(crate) node_id: i64,
    pub(crate) lifetime: Lifetime,
    pub(crate) delegators: DelegatorDirectory,
    pub(crate) manager: Arc<Manager>,
    pub(crate) loader: Arc<dyn SegmentLoader>,
    pub(crate) scheduler: Arc<dyn Scheduler>,
    pub(crate) query_hook: Option<Arc<dyn QueryHook>>,
    pub(crate) search_reducer: Arc<dyn SearchReducer>,
    pub(crate) metrics: QueryNodeMetrics,
}

impl QueryNode {
    pub fn new(
        node_id: i64,
        manager: Arc<Manager>,
        loader: Arc<dyn SegmentLoader>,
        scheduler: Arc<dyn Scheduler>,
    ) -> Result<Self, QueryNodeError> {
        Ok(Self {
            node_id,
            lifetime: Lifetime::new(),
            delegators: DelegatorDirectory::new(),
            manager,
            loader,
            scheduler,
            query_hook: None,
            search_reducer: Arc::new(TopKSearchReducer),
            metrics: QueryNodeMetrics::new(node_id)?,
        })
    }

    /// Builds a node with a [`TaskScheduler`] and, when configured, a
    /// [`ParamOverrideHook`]. Must run inside a tokio runtime.
    pub fn from_settings(
        settings: &Settings,
        manager: Arc<Manager>,
        loader: Arc<dyn SegmentLoader>,
    ) -> Result<Self, QueryNodeError> {
        let scheduler = Arc::new(TaskScheduler::from_config(&settings.scheduler));
        let mut node = Self::new(settings.node.node_id, manager, loader, scheduler)?;
        if let Some(hook_cfg) = &settings.query_hook {
            info!(target: LOG_TARGET, max_topk = ?hook_cfg.max_topk, "Query hook enabled");
            node.query_hook = Some(Arc::new(ParamOverrideHook::from_config(hook_cfg)));
        }
        Ok(node)
    }

    pub fn with_query_hook(mut self, hook: Arc<dyn QueryHook>) -> Self {
        self.query_hook = Some(hook);
        self
    }

    pub fn with_search_reducer(mut self, reducer: Arc<dyn SearchReducer>) -> Self {
        self.search_reducer = reducer;
        self
    }

    pub fn start(&self) {
        self.lifetime.set_state(LifetimeState::Healthy);
        info!(target: LOG_TARGET, node_id = self.node_id, "Query node is serving");
    }

    /// Stops admitting requests and waits up to `grace` for in-flight ones.
    pub async fn stop(&self, grace: Duration) -> bool {
        self.lifetime.set_state(LifetimeState::Stopping);
        let drained = self.lifetime.wait_idle(grace).await;
        if !drained {
            warn!(
                target: LOG_TARGET,
                node_id = self.node_id,
                in_flight = self.lifetime.in_flight(),
                "Query node stopped with requests in flight"
            );
        }
        drained
    }

    pub fn node_id(&self) -> i64 {
        self.node_id
    }

    pub fn lifetime(&self) -> &Lifetime {
        &self.lifetime
    }

    pub fn delegators(&self) -> &DelegatorDirectory {
        &self.delegators
    }

    pub fn manager(&self) -> &Arc<Manager> {
        &self.manager
    }

    pub fn metrics(&self) -> &QueryNodeMetrics {
        &self.metrics
    }
}
