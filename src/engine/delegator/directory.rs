use dashmap::DashMap;
use std::sync::Arc;
use tracing::info;

use super::traits::ShardDelegator;

const LOG_TARGET: &str = "query_node::delegator";

/// Channel name to delegator registry.
///
/// Writes belong to the channel watch/unwatch path; the request path only
/// reads. `get` hands out an owned handle so one request keeps using the
/// same delegator even if the entry is replaced concurrently.
#[derive(Default)]
pub struct DelegatorDirectory {
    delegators: DashMap<String, Arc<dyn ShardDelegator>>,
}

impl DelegatorDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, channel: &str) -> Option<Arc<dyn ShardDelegator>> {
        self.delegators
            .get(channel)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Registers `delegator` under its channel, returning the handle it replaced.
    pub fn insert(&self, delegator: Arc<dyn ShardDelegator>) -> Option<Arc<dyn ShardDelegator>> {
        let channel = delegator.channel().to_string();
        info!(target: LOG_TARGET, channel = %channel, "Registering shard delegator");
        self.delegators.insert(channel, delegator)
    }

    pub fn remove(&self, channel: &str) -> Option<Arc<dyn ShardDelegator>> {
        info!(target: LOG_TARGET, channel, "Removing shard delegator");
        self.delegators.remove(channel).map(|(_, delegator)| delegator)
    }

    pub fn contains(&self, channel: &str) -> bool {
        self.delegators.contains_key(channel)
    }

    pub fn len(&self) -> usize {
        self.delegators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delegators.is_empty()
    }

    pub fn channels(&self) -> Vec<String> {
        let mut channels: Vec<String> = self
            .delegators
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        channels.sort();
        channels
    }
}
