use prost::Message;

use crate::engine::errors::QueryNodeError;

#[derive(Clone, PartialEq, Message)]
pub struct PlanNode {
    #[prost(oneof = "plan_node::Node", tags = "1, 4")]
    pub node: Option<plan_node::Node>,
    #[prost(int64, repeated, tag = "3")]
    pub output_field_ids: Vec<i64>,
}

pub mod plan_node {
    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum Node {
        #[prost(message, tag = "1")]
        VectorAnns(super::VectorAnns),
        #[prost(message, tag = "4")]
        Query(super::QueryPlanNode),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum VectorType {
    BinaryVector = 0,
    FloatVector = 1,
    Float16Vector = 2,
    SparseFloatVector = 3,
}

#[derive(Clone, PartialEq, Message)]
pub struct VectorAnns {
    #[prost(enumeration = "VectorType", tag = "1")]
    pub vector_type: i32,
    #[prost(int64, tag = "2")]
    pub field_id: i64,
    #[prost(message, optional, tag = "3")]
    pub predicates: Option<Expr>,
    #[prost(message, optional, tag = "4")]
    pub query_info: Option<QueryInfo>,
    #[prost(string, tag = "5")]
    pub placeholder_tag: String,
}

#[derive(Clone, PartialEq, Message)]
pub struct QueryInfo {
    #[prost(int64, tag = "1")]
    pub topk: i64,
    #[prost(string, tag = "3")]
    pub metric_type: String,
    /// JSON-encoded index search parameters, e.g. `{"ef": 64}`.
    #[prost(string, tag = "4")]
    pub search_params: String,
    #[prost(int64, tag = "5")]
    pub round_decimal: i64,
    #[prost(int64, tag = "6")]
    pub group_by_field_id: i64,
}

#[derive(Clone, PartialEq, Message)]
pub struct QueryPlanNode {
    #[prost(message, optional, tag = "1")]
    pub predicates: Option<Expr>,
    #[prost(bool, tag = "2")]
    pub is_count: bool,
    #[prost(int64, tag = "3")]
    pub limit: i64,
}

/// Filter expression, carried in its encoded form.
#[derive(Clone, PartialEq, Message)]
pub struct Expr {
    #[prost(bytes = "vec", tag = "1")]
    pub serialized: Vec<u8>,
}

impl PlanNode {
    pub fn decode_plan(bytes: &[u8]) -> Result<Self, QueryNodeError> {
        PlanNode::decode(bytes).map_err(|e| {
            QueryNodeError::invalid_parameter(
                "valid serialized search plan",
                format!("no unmarshalable one: {e}"),
            )
        })
    }

    pub fn encode_plan(&self) -> Result<Vec<u8>, QueryNodeError> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.encode(&mut buf).map_err(|e| {
            QueryNodeError::invalid_parameter(
                "marshalable search plan",
                format!("plan with marshal error: {e}"),
            )
        })?;
        Ok(buf)
    }

    pub fn kind(&self) -> &'static str {
        match &self.node {
            Some(plan_node::Node::VectorAnns(_)) => "VectorAnns",
            Some(plan_node::Node::Query(_)) => "Query",
            None => "None",
        }
    }
}
