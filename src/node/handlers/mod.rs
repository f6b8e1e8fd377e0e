mod load;
mod optimize;
mod query;
mod search;
mod statistics;

pub use load::{LoadFailurePolicy, collect_growing_segments, load_growing_segments};
pub use statistics::{ROW_COUNT_FIELD, StatValue, reduce_local, reduce_remote};

use std::future::Future;
use tokio_util::sync::{CancellationToken, DropGuard};

use super::lifetime::{Lifetime, LifetimeGuard};
use crate::engine::errors::QueryNodeError;

const LOG_TARGET: &str = "query_node::handlers";

/// Admission to the node plus a child cancellation token, both released
/// when the scope is dropped.
pub(crate) struct RequestScope {
    token: CancellationToken,
    _cancel_on_drop: DropGuard,
    _admission: LifetimeGuard,
}

impl RequestScope {
    pub(crate) fn enter(
        lifetime: &Lifetime,
        parent: &CancellationToken,
    ) -> Result<Self, QueryNodeError> {
        let admission = lifetime.add()?;
        let token = parent.child_token();
        Ok(Self {
            _cancel_on_drop: token.clone().drop_guard(),
            token,
            _admission: admission,
        })
    }

    pub(crate) fn token(&self) -> &CancellationToken {
        &self.token
    }
}

/// Runs `fut` unless `token` fires first.
pub(crate) async fn until_cancelled<T, F>(
    token: &CancellationToken,
    fut: F,
) -> Result<T, QueryNodeError>
where
    F: Future<Output = Result<T, QueryNodeError>>,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(QueryNodeError::Cancelled),
        result = fut => result,
    }
}
