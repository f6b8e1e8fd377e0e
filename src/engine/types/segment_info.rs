use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{MsgBase, UniqueId};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Binlog {
    pub entries_num: i64,
    pub log_path: String,
    pub log_size: i64,
}

/// Logs of one field of a segment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldBinlog {
    pub field_id: i64,
    pub binlogs: Vec<Binlog>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldIndexInfo {
    pub field_id: i64,
    pub index_id: i64,
    pub build_id: i64,
    pub index_file_paths: Vec<String>,
}

/// Segment descriptor as known to the data coordinator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentInfo {
    pub id: UniqueId,
    pub collection_id: UniqueId,
    pub partition_id: UniqueId,
    pub insert_channel: String,
    pub num_of_rows: i64,
    pub binlogs: Vec<FieldBinlog>,
    pub statslogs: Vec<FieldBinlog>,
    pub deltalogs: Vec<FieldBinlog>,
}

/// Everything a loader needs to materialize one segment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentLoadInfo {
    pub segment_id: UniqueId,
    pub partition_id: UniqueId,
    pub collection_id: UniqueId,
    pub binlog_paths: Vec<FieldBinlog>,
    pub num_of_rows: i64,
    pub statslogs: Vec<FieldBinlog>,
    pub deltalogs: Vec<FieldBinlog>,
    pub insert_channel: String,
    pub index_infos: Vec<FieldIndexInfo>,
}

impl From<&SegmentInfo> for SegmentLoadInfo {
    fn from(info: &SegmentInfo) -> Self {
        Self {
            segment_id: info.id,
            partition_id: info.partition_id,
            collection_id: info.collection_id,
            binlog_paths: info.binlogs.clone(),
            num_of_rows: info.num_of_rows,
            statslogs: info.statslogs.clone(),
            deltalogs: info.deltalogs.clone(),
            insert_channel: info.insert_channel.clone(),
            index_infos: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VchannelInfo {
    pub collection_id: UniqueId,
    pub channel_name: String,
    pub unflushed_segment_ids: Vec<UniqueId>,
    pub flushed_segment_ids: Vec<UniqueId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WatchDmChannelsRequest {
    pub base: MsgBase,
    pub collection_id: UniqueId,
    pub partition_ids: Vec<UniqueId>,
    pub infos: Vec<VchannelInfo>,
    pub segment_infos: HashMap<UniqueId, SegmentInfo>,
    pub version: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoadScope {
    #[default]
    Full,
    Delta,
    Index,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadSegmentsRequest {
    pub base: MsgBase,
    pub collection_id: UniqueId,
    pub dst_node_id: i64,
    pub infos: Vec<SegmentLoadInfo>,
    pub version: i64,
    pub load_scope: LoadScope,
}

impl WatchDmChannelsRequest {
    /// The channel being watched; a watch request targets a single channel.
    pub fn channel(&self) -> Option<&str> {
        self.infos.first().map(|info| info.channel_name.as_str())
    }
}
