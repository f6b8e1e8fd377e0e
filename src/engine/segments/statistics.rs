use tracing::debug;

use super::manager::{Manager, PinnedSegments};
use super::segment::SegmentType;
use crate::engine::errors::QueryNodeError;
use crate::engine::types::{DataScope, SegmentStats, UniqueId};

/// Pins the segments of `scope` and reads their row counts.
///
/// The returned guards keep the segments pinned; dropping them releases them.
pub fn collect_segment_stats<'a>(
    manager: &'a Manager,
    scope: DataScope,
    collection_id: UniqueId,
    partition_ids: &[UniqueId],
    segment_ids: &[UniqueId],
) -> Result<(Vec<SegmentStats>, Vec<PinnedSegments<'a>>), QueryNodeError> {
    if manager.collection.get(collection_id).is_none() {
        return Err(QueryNodeError::CollectionNotFound(collection_id));
    }

    let types = SegmentType::for_scope(scope);
    let mut pinned = Vec::with_capacity(types.len());
    let mut stats = Vec::new();
    for segment_type in types {
        let segments =
            manager
                .segment
                .pin(*segment_type, collection_id, partition_ids, segment_ids);
        stats.extend(segments.segments().iter().map(|segment| SegmentStats {
            segment_id: segment.id(),
            row_count: segment.row_count(),
        }));
        pinned.push(segments);
    }

    debug!(
        target: "query_node::segments",
        collection_id,
        ?scope,
        segments = stats.len(),
        "Collected segment statistics"
    );
    Ok((stats, pinned))
}
