pub mod handlers;
pub mod lifetime;
pub mod metrics;
mod query_node;

pub use lifetime::{Lifetime, LifetimeGuard, LifetimeState};
pub use metrics::QueryNodeMetrics;
pub use query_node::QueryNode;
