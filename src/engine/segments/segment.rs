use parking_lot::RwLock;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::fmt::Debug;

use crate::engine::types::{DataScope, FieldData, RetrieveResults, UniqueId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentType {
    Growing,
    Sealed,
}

impl SegmentType {
    /// `Historical` reads sealed segments, `Streaming` growing ones and `All` both.
    pub fn for_scope(scope: DataScope) -> &'static [SegmentType] {
        match scope {
            DataScope::Historical => &[SegmentType::Sealed],
            DataScope::Streaming => &[SegmentType::Growing],
            DataScope::All => &[SegmentType::Sealed, SegmentType::Growing],
        }
    }
}

/// A segment as seen by the query path.
///
/// Only `LocalSegment` supports delta-log and index loading; other kinds
/// return `None` from [`Segment::as_local`] and are skipped by those paths.
pub trait Segment: Send + Sync + Debug {
    fn id(&self) -> UniqueId;
    fn collection_id(&self) -> UniqueId;
    fn partition_id(&self) -> UniqueId;
    fn segment_type(&self) -> SegmentType;
    fn insert_channel(&self) -> &str;

    /// Live rows, after deletes.
    fn row_count(&self) -> i64;

    /// Up to `limit` live rows (`limit <= 0` means all), ordered by primary key.
    fn retrieve(&self, limit: i64) -> RetrieveResults;

    fn as_local(&self) -> Option<&LocalSegment> {
        None
    }
}

/// Segment whose data is resident on this node.
#[derive(Debug)]
pub struct LocalSegment {
    id: UniqueId,
    collection_id: UniqueId,
    partition_id: UniqueId,
    segment_type: SegmentType,
    insert_channel: String,
    rows: BTreeMap<i64, Vec<(i64, Value)>>,
    deleted: RwLock<HashSet<i64>>,
    loaded_deltalogs: RwLock<Vec<String>>,
    indexed_fields: RwLock<HashSet<i64>>,
}

impl LocalSegment {
    pub fn new(
        id: UniqueId,
        collection_id: UniqueId,
        partition_id: UniqueId,
        segment_type: SegmentType,
        insert_channel: impl Into<String>,
    ) -> Self {
        Self {
            id,
            collection_id,
            partition_id,
            segment_type,
            insert_channel: insert_channel.into(),
            rows: BTreeMap::new(),
            deleted: RwLock::new(HashSet::new()),
            loaded_deltalogs: RwLock::new(Vec::new()),
            indexed_fields: RwLock::new(HashSet::new()),
        }
    }

    /// Adds a row keyed by primary key; `fields` pairs a field id with its value.
    pub fn with_row(mut self, pk: i64, fields: Vec<(i64, Value)>) -> Self {
        self.rows.insert(pk, fields);
        self
    }

    pub fn apply_deletes(&self, pks: &[i64]) -> usize {
        let mut deleted = self.deleted.write();
        pks.iter()
            .filter(|pk| self.rows.contains_key(*pk))
            .filter(|pk| deleted.insert(**pk))
            .count()
    }

    pub fn record_deltalog(&self, path: impl Into<String>) {
        self.loaded_deltalogs.write().push(path.into());
    }

    pub fn loaded_deltalogs(&self) -> Vec<String> {
        self.loaded_deltalogs.read().clone()
    }

    pub fn mark_index_loaded(&self, field_id: i64) {
        self.indexed_fields.write().insert(field_id);
    }

    pub fn has_index(&self, field_id: i64) -> bool {
        self.indexed_fields.read().contains(&field_id)
    }
}

impl Segment for LocalSegment {
    fn id(&self) -> UniqueId {
        self.id
    }

    fn collection_id(&self) -> UniqueId {
        self.collection_id
    }

    fn partition_id(&self) -> UniqueId {
        self.partition_id
    }

    fn segment_type(&self) -> SegmentType {
        self.segment_type
    }

    fn insert_channel(&self) -> &str {
        &self.insert_channel
    }

    fn row_count(&self) -> i64 {
        let deleted = self.deleted.read();
        (self.rows.len() - deleted.len()) as i64
    }

    fn retrieve(&self, limit: i64) -> RetrieveResults {
        let deleted = self.deleted.read();
        let take = if limit <= 0 {
            usize::MAX
        } else {
            limit as usize
        };

        let mut ids = Vec::new();
        let mut columns: BTreeMap<i64, Vec<Value>> = BTreeMap::new();
        for (pk, fields) in self
            .rows
            .iter()
            .filter(|(pk, _)| !deleted.contains(*pk))
            .take(take)
        {
            ids.push(*pk);
            for (field_id, value) in fields {
                columns.entry(*field_id).or_default().push(value.clone());
            }
        }

        RetrieveResults {
            all_retrieve_count: ids.len() as i64,
            ids,
            fields_data: columns
                .into_iter()
                .map(|(field_id, values)| FieldData {
                    field_id,
                    field_name: String::new(),
                    values,
                })
                .collect(),
        }
    }

    fn as_local(&self) -> Option<&LocalSegment> {
        Some(self)
    }
}

/// Delete-only sealed segment; it carries deltas for other segments and no rows.
#[derive(Debug)]
pub struct L0Segment {
    id: UniqueId,
    collection_id: UniqueId,
    partition_id: UniqueId,
    insert_channel: String,
}

impl L0Segment {
    pub fn new(
        id: UniqueId,
        collection_id: UniqueId,
        partition_id: UniqueId,
        insert_channel: impl Into<String>,
    ) -> Self {
        Self {
            id,
            collection_id,
            partition_id,
            insert_channel: insert_channel.into(),
        }
    }
}

impl Segment for L0Segment {
    fn id(&self) -> UniqueId {
        self.id
    }

    fn collection_id(&self) -> UniqueId {
        self.collection_id
    }

    fn partition_id(&self) -> UniqueId {
        self.partition_id
    }

    fn segment_type(&self) -> SegmentType {
        SegmentType::Sealed
    }

    fn insert_channel(&self) -> &str {
        &self.insert_channel
    }

    fn row_count(&self) -> i64 {
        0
    }

    fn retrieve(&self, _limit: i64) -> RetrieveResults {
        RetrieveResults::default()
    }
}
