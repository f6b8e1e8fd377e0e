use serde::{Deserialize, Serialize};

use super::UniqueId;

/// Which part of a channel's data a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DataScope {
    #[default]
    All,
    Streaming,
    Historical,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MsgBase {
    pub msg_id: i64,
    pub timestamp: u64,
    pub source_id: i64,
}

/// Search payload as routed from the proxy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchPayload {
    pub base: MsgBase,
    pub collection_id: UniqueId,
    pub partition_ids: Vec<UniqueId>,
    /// Encoded `PlanNode`.
    pub serialized_expr_plan: Option<Vec<u8>>,
    pub nq: i64,
    pub topk: i64,
    pub metric_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub req: SearchPayload,
    pub dml_channels: Vec<String>,
    pub segment_ids: Vec<UniqueId>,
    pub from_shard_leader: bool,
    pub scope: DataScope,
    /// Number of channels the proxy fanned the search out to; `<= 0` means unknown.
    pub total_channel_num: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetrievePayload {
    pub base: MsgBase,
    pub collection_id: UniqueId,
    pub partition_ids: Vec<UniqueId>,
    pub serialized_expr_plan: Option<Vec<u8>>,
    pub output_field_ids: Vec<i64>,
    /// Maximum number of rows to return; `<= 0` means unlimited.
    pub limit: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub req: RetrievePayload,
    pub dml_channels: Vec<String>,
    pub segment_ids: Vec<UniqueId>,
    pub from_shard_leader: bool,
    pub scope: DataScope,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsPayload {
    pub base: MsgBase,
    pub collection_id: UniqueId,
    pub partition_ids: Vec<UniqueId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetStatisticsRequest {
    pub req: StatisticsPayload,
    pub dml_channels: Vec<String>,
    pub segment_ids: Vec<UniqueId>,
    pub from_shard_leader: bool,
    pub scope: DataScope,
}
