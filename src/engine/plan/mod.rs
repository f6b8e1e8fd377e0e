//! Binary query plan exchanged between proxy and query nodes.
//!
//! The plan is a protobuf tagged union. Only the parts the query node
//! inspects are modelled field by field; filter expressions stay opaque.
//! Rewrites go through the wire encoding so unmodelled fields survive.

mod node;
mod rewrite;

pub use node::{Expr, PlanNode, QueryInfo, QueryPlanNode, VectorAnns, VectorType, plan_node};
pub use rewrite::rewrite_query_info;
