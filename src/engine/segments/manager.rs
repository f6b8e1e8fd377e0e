use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

use super::collection::CollectionManager;
use super::segment::{Segment, SegmentType};
use crate::engine::types::UniqueId;

const LOG_TARGET: &str = "query_node::segments";

/// Collection and segment state shared by the query path and the load path.
#[derive(Debug, Default)]
pub struct Manager {
    pub collection: CollectionManager,
    pub segment: SegmentManager,
}

impl Manager {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

/// Owns segment handles; entries may be removed at any time by the load path.
#[derive(Debug, Default)]
pub struct SegmentManager {
    sealed: DashMap<UniqueId, Arc<dyn Segment>>,
    growing: DashMap<UniqueId, Arc<dyn Segment>>,
    pins: DashMap<UniqueId, usize>,
}

impl SegmentManager {
    pub fn put(&self, segment: Arc<dyn Segment>) {
        let id = segment.id();
        match segment.segment_type() {
            SegmentType::Sealed => self.sealed.insert(id, segment),
            SegmentType::Growing => self.growing.insert(id, segment),
        };
    }

    pub fn get_sealed(&self, segment_id: UniqueId) -> Option<Arc<dyn Segment>> {
        self.sealed
            .get(&segment_id)
            .map(|entry| Arc::clone(entry.value()))
    }

    pub fn get_growing(&self, segment_id: UniqueId) -> Option<Arc<dyn Segment>> {
        self.growing
            .get(&segment_id)
            .map(|entry| Arc::clone(entry.value()))
    }

    pub fn remove(&self, segment_id: UniqueId) -> bool {
        let sealed = self.sealed.remove(&segment_id).is_some();
        let growing = self.growing.remove(&segment_id).is_some();
        sealed || growing
    }

    pub fn len(&self, segment_type: SegmentType) -> usize {
        match segment_type {
            SegmentType::Sealed => self.sealed.len(),
            SegmentType::Growing => self.growing.len(),
        }
    }

    /// Pins the segments of `collection_id` that match the filters.
    ///
    /// Empty `partition_ids` or `segment_ids` match everything. Requested
    /// segments that are no longer present are skipped.
    pub fn pin(
        &self,
        segment_type: SegmentType,
        collection_id: UniqueId,
        partition_ids: &[UniqueId],
        segment_ids: &[UniqueId],
    ) -> PinnedSegments<'_> {
        let source = match segment_type {
            SegmentType::Sealed => &self.sealed,
            SegmentType::Growing => &self.growing,
        };

        let mut segments: Vec<Arc<dyn Segment>> = if segment_ids.is_empty() {
            source
                .iter()
                .map(|entry| Arc::clone(entry.value()))
                .collect()
        } else {
            segment_ids
                .iter()
                .filter_map(|id| {
                    let found = source.get(id).map(|entry| Arc::clone(entry.value()));
                    if found.is_none() {
                        debug!(target: LOG_TARGET, segment_id = id, "Requested segment not present, skipping");
                    }
                    found
                })
                .collect()
        };

        segments.retain(|segment| {
            segment.collection_id() == collection_id
                && (partition_ids.is_empty() || partition_ids.contains(&segment.partition_id()))
        });
        segments.sort_by_key(|segment| segment.id());

        for segment in &segments {
            *self.pins.entry(segment.id()).or_insert(0) += 1;
        }

        PinnedSegments {
            manager: self,
            segments,
        }
    }

    fn unpin(&self, segments: &[Arc<dyn Segment>]) {
        for segment in segments {
            let id = segment.id();
            let released = match self.pins.get_mut(&id) {
                Some(mut count) => {
                    *count = count.saturating_sub(1);
                    *count == 0
                }
                None => false,
            };
            if released {
                self.pins.remove_if(&id, |_, count| *count == 0);
            }
        }
    }

    pub fn pin_count(&self, segment_id: UniqueId) -> usize {
        self.pins.get(&segment_id).map(|count| *count).unwrap_or(0)
    }
}

/// Segments pinned for the duration of a read; unpinned when dropped.
#[derive(Debug)]
pub struct PinnedSegments<'a> {
    manager: &'a SegmentManager,
    segments: Vec<Arc<dyn Segment>>,
}

impl PinnedSegments<'_> {
    pub fn segments(&self) -> &[Arc<dyn Segment>] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl Drop for PinnedSegments<'_> {
    fn drop(&mut self) {
        self.manager.unpin(&self.segments);
    }
}
