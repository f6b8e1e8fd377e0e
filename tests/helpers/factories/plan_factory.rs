use crate::engine::plan::{
    Expr, PlanNode, QueryInfo, QueryPlanNode, VectorAnns, VectorType, plan_node,
};

/// Builds encoded search and query plans.
pub struct PlanFactory {
    node: plan_node::Node,
}

impl PlanFactory {
    pub fn vector_anns() -> Self {
        Self {
            node: plan_node::Node::VectorAnns(VectorAnns {
                vector_type: VectorType::FloatVector as i32,
                field_id: 102,
                predicates: None,
                query_info: Some(QueryInfo {
                    topk: 10,
                    metric_type: "L2".to_string(),
                    search_params: r#"{"ef":16}"#.to_string(),
                    round_decimal: -1,
                    group_by_field_id: 0,
                }),
                placeholder_tag: "$0".to_string(),
            }),
        }
    }

    pub fn query() -> Self {
        Self {
            node: plan_node::Node::Query(QueryPlanNode {
                predicates: Some(Expr {
                    serialized: b"age > 18".to_vec(),
                }),
                is_count: false,
                limit: 5,
            }),
        }
    }

    pub fn with_topk(mut self, topk: i64) -> Self {
        if let plan_node::Node::VectorAnns(anns) = &mut self.node {
            anns.query_info.get_or_insert_with(Default::default).topk = topk;
        }
        self
    }

    pub fn with_filter(mut self) -> Self {
        if let plan_node::Node::VectorAnns(anns) = &mut self.node {
            anns.predicates = Some(Expr {
                serialized: b"age > 18".to_vec(),
            });
        }
        self
    }

    pub fn create(self) -> PlanNode {
        PlanNode {
            node: Some(self.node),
            output_field_ids: vec![100, 101],
        }
    }

    pub fn encode(self) -> Vec<u8> {
        self.create().encode_plan().unwrap()
    }
}
