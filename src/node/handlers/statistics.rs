use indexmap::IndexMap;
use once_cell::sync::Lazy;
use std::fmt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::{LOG_TARGET, RequestScope, until_cancelled};
use crate::engine::errors::QueryNodeError;
use crate::engine::segments::collect_segment_stats;
use crate::engine::types::{GetStatisticsRequest, SegmentStats, StatisticsResponse};
use crate::node::QueryNode;
use crate::node::metrics::STATISTICS_LABEL;
use crate::shared::response::KeyValuePair;

pub const ROW_COUNT_FIELD: &str = "row_count";

/// Accumulated value of one statistic field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatValue {
    Int64(i64),
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Int64(v) => write!(f, "{v}"),
        }
    }
}

type MergeFn = fn(StatValue, &str, &str) -> Result<StatValue, QueryNodeError>;

struct StatField {
    seed: StatValue,
    merge: MergeFn,
}

/// Every field a partial statistics response may carry, in output order.
static STAT_FIELDS: Lazy<IndexMap<&'static str, StatField>> = Lazy::new(|| {
    IndexMap::from([(
        ROW_COUNT_FIELD,
        StatField {
            seed: StatValue::Int64(0),
            merge: sum_int64,
        },
    )])
});

fn sum_int64(acc: StatValue, field: &str, raw: &str) -> Result<StatValue, QueryNodeError> {
    let StatValue::Int64(total) = acc;
    let value = raw
        .parse::<i64>()
        .map_err(|source| QueryNodeError::ParseStatistic {
            field: field.to_string(),
            value: raw.to_string(),
            source,
        })?;
    total
        .checked_add(value)
        .map(StatValue::Int64)
        .ok_or_else(|| QueryNodeError::Reduce(format!("{field} overflows i64")))
}

/// Sums the row counts of locally read segments.
pub fn reduce_local(stats: &[SegmentStats]) -> Result<StatisticsResponse, QueryNodeError> {
    let total = stats
        .iter()
        .try_fold(0i64, |acc, s| acc.checked_add(s.row_count))
        .ok_or_else(|| QueryNodeError::Reduce(format!("{ROW_COUNT_FIELD} overflows i64")))?;
    Ok(StatisticsResponse::from_stats(vec![KeyValuePair::new(
        ROW_COUNT_FIELD,
        total.to_string(),
    )]))
}

/// Merges shard-level statistics responses field by field.
///
/// Fails on the first field that has no registered merge function, so a
/// partially understood response never yields a partial result.
pub fn reduce_remote(
    responses: &[StatisticsResponse],
) -> Result<StatisticsResponse, QueryNodeError> {
    let mut merged: IndexMap<&'static str, StatValue> = STAT_FIELDS
        .iter()
        .map(|(name, field)| (*name, field.seed))
        .collect();

    for partial in responses {
        for pair in &partial.stats {
            let Some((name, field)) = STAT_FIELDS.get_key_value(pair.key.as_str()) else {
                return Err(QueryNodeError::UnknownStatisticField(pair.key.clone()));
            };
            let Some(acc) = merged.get_mut(name) else {
                return Err(QueryNodeError::Reduce(format!("{name} has no accumulator")));
            };
            *acc = (field.merge)(*acc, name, &pair.value)?;
        }
    }

    let stats = merged
        .into_iter()
        .map(|(name, value)| KeyValuePair::new(name, value.to_string()))
        .collect();
    Ok(StatisticsResponse::from_stats(stats))
}

impl QueryNode {
    /// Statistics of `channel`: read from local segments when the request
    /// comes from the shard leader, otherwise gathered through the delegator.
    pub async fn get_channel_statistics(
        &self,
        req: &GetStatisticsRequest,
        channel: &str,
        cancel: &CancellationToken,
    ) -> Result<StatisticsResponse, QueryNodeError> {
        let scope = RequestScope::enter(&self.lifetime, cancel)?;
        let metrics = self.metrics.request(STATISTICS_LABEL);

        let collection_id = req.req.collection_id;
        debug!(
            target: LOG_TARGET,
            collection_id,
            channel,
            scope = ?req.scope,
            from_shard_leader = req.from_shard_leader,
            "Start to get channel statistics"
        );

        if req.from_shard_leader {
            let (stats, _pinned) = collect_segment_stats(
                &self.manager,
                req.scope,
                collection_id,
                &req.req.partition_ids,
                &req.segment_ids,
            )
            .inspect_err(|e| {
                warn!(target: LOG_TARGET, channel, error = %e, "Get segments statistics failed");
            })?;
            let resp = reduce_local(&stats)?;
            metrics.success();
            return Ok(resp);
        }

        let Some(delegator) = self.delegators.get(channel) else {
            let err = QueryNodeError::ChannelNotFound(channel.to_string());
            warn!(target: LOG_TARGET, channel, error = %err, "GetStatistics failed, no shard delegator for channel");
            return Err(err);
        };

        let results = until_cancelled(scope.token(), delegator.get_statistics(scope.token(), req))
            .await
            .inspect_err(|e| {
                warn!(target: LOG_TARGET, channel, error = %e, "Failed to get statistics from delegator");
            })?;

        let resp = reduce_remote(&results).inspect_err(|e| {
            warn!(target: LOG_TARGET, channel, error = %e, "Failed to reduce channel statistics");
        })?;
        metrics.success();
        Ok(resp)
    }
}
