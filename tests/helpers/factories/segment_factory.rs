use serde_json::json;

use super::collection_factory::{AGE_FIELD_ID, PK_FIELD_ID};
use crate::engine::segments::{LocalSegment, SegmentType};
use crate::engine::types::UniqueId;

/// Builds local segments holding `pk`/`age` rows.
pub struct SegmentFactory {
    id: UniqueId,
    collection_id: UniqueId,
    partition_id: UniqueId,
    segment_type: SegmentType,
    pks: Vec<i64>,
}

impl SegmentFactory {
    pub fn sealed(id: UniqueId) -> Self {
        Self::new(id, SegmentType::Sealed)
    }

    pub fn growing(id: UniqueId) -> Self {
        Self::new(id, SegmentType::Growing)
    }

    fn new(id: UniqueId, segment_type: SegmentType) -> Self {
        Self {
            id,
            collection_id: 1,
            partition_id: 10,
            segment_type,
            pks: Vec::new(),
        }
    }

    pub fn with_collection_id(mut self, collection_id: UniqueId) -> Self {
        self.collection_id = collection_id;
        self
    }

    pub fn with_partition_id(mut self, partition_id: UniqueId) -> Self {
        self.partition_id = partition_id;
        self
    }

    pub fn with_pks(mut self, pks: impl IntoIterator<Item = i64>) -> Self {
        self.pks.extend(pks);
        self
    }

    pub fn create(self) -> LocalSegment {
        self.pks.iter().fold(
            LocalSegment::new(
                self.id,
                self.collection_id,
                self.partition_id,
                self.segment_type,
                "dml_0_v0",
            ),
            |segment, pk| {
                segment.with_row(
                    *pk,
                    vec![(PK_FIELD_ID, json!(pk)), (AGE_FIELD_ID, json!(pk * 10))],
                )
            },
        )
    }
}
