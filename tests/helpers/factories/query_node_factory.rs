use std::sync::Arc;

use super::collection_factory::CollectionFactory;
use crate::engine::hook::QueryHook;
use crate::engine::scheduler::{Scheduler, TaskScheduler};
use crate::engine::segments::{Manager, SegmentLoader};
use crate::node::QueryNode;
use crate::test_helpers::mocks::MockSegmentLoader;

/// Builds a started node with collection 1 loaded. Needs a tokio runtime
/// unless a scheduler is supplied.
pub struct QueryNodeFactory {
    node_id: i64,
    manager: Arc<Manager>,
    loader: Option<Arc<dyn SegmentLoader>>,
    scheduler: Option<Arc<dyn Scheduler>>,
    hook: Option<Arc<dyn QueryHook>>,
    started: bool,
}

impl QueryNodeFactory {
    pub fn new() -> Self {
        let manager = Manager::new();
        manager.collection.put(CollectionFactory::new().create());
        Self {
            node_id: 1,
            manager,
            loader: None,
            scheduler: None,
            hook: None,
            started: true,
        }
    }

    pub fn with_manager(mut self, manager: Arc<Manager>) -> Self {
        self.manager = manager;
        self
    }

    pub fn with_loader(mut self, loader: Arc<dyn SegmentLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    pub fn with_scheduler(mut self, scheduler: Arc<dyn Scheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    pub fn with_hook(mut self, hook: Arc<dyn QueryHook>) -> Self {
        self.hook = Some(hook);
        self
    }

    pub fn not_started(mut self) -> Self {
        self.started = false;
        self
    }

    pub fn create(self) -> QueryNode {
        let loader = self
            .loader
            .unwrap_or_else(|| Arc::new(MockSegmentLoader::new()));
        let scheduler = self
            .scheduler
            .unwrap_or_else(|| Arc::new(TaskScheduler::start(16, 4)));
        let mut node = QueryNode::new(self.node_id, self.manager, loader, scheduler).unwrap();
        if let Some(hook) = self.hook {
            node = node.with_query_hook(hook);
        }
        if self.started {
            node.start();
        }
        node
    }
}
