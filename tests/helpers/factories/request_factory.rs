use super::plan_factory::PlanFactory;
use crate::engine::types::{
    DataScope, GetStatisticsRequest, QueryRequest, RetrievePayload, SearchPayload, SearchRequest,
    StatisticsPayload, UniqueId,
};

pub struct SearchRequestFactory {
    req: SearchRequest,
}

impl SearchRequestFactory {
    pub fn new() -> Self {
        Self {
            req: SearchRequest {
                req: SearchPayload {
                    collection_id: 1,
                    serialized_expr_plan: Some(PlanFactory::vector_anns().encode()),
                    nq: 1,
                    topk: 3,
                    metric_type: "L2".to_string(),
                    ..Default::default()
                },
                dml_channels: vec!["dml_0_v0".to_string()],
                total_channel_num: 1,
                ..Default::default()
            },
        }
    }

    pub fn with_plan(mut self, plan: Option<Vec<u8>>) -> Self {
        self.req.req.serialized_expr_plan = plan;
        self
    }

    pub fn with_nq_topk(mut self, nq: i64, topk: i64) -> Self {
        self.req.req.nq = nq;
        self.req.req.topk = topk;
        self
    }

    pub fn with_metric(mut self, metric_type: &str) -> Self {
        self.req.req.metric_type = metric_type.to_string();
        self
    }

    pub fn with_total_channel_num(mut self, total_channel_num: i32) -> Self {
        self.req.total_channel_num = total_channel_num;
        self
    }

    pub fn create(self) -> SearchRequest {
        self.req
    }
}

pub struct QueryRequestFactory {
    req: QueryRequest,
}

impl QueryRequestFactory {
    pub fn new() -> Self {
        Self {
            req: QueryRequest {
                req: RetrievePayload {
                    collection_id: 1,
                    serialized_expr_plan: Some(PlanFactory::query().encode()),
                    output_field_ids: vec![100, 101],
                    ..Default::default()
                },
                dml_channels: vec!["dml_0_v0".to_string()],
                ..Default::default()
            },
        }
    }

    pub fn with_collection_id(mut self, collection_id: UniqueId) -> Self {
        self.req.req.collection_id = collection_id;
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.req.req.limit = limit;
        self
    }

    pub fn with_scope(mut self, scope: DataScope) -> Self {
        self.req.scope = scope;
        self
    }

    pub fn with_segment_ids(mut self, segment_ids: &[UniqueId]) -> Self {
        self.req.segment_ids = segment_ids.to_vec();
        self
    }

    pub fn create(self) -> QueryRequest {
        self.req
    }
}

pub struct StatisticsRequestFactory {
    req: GetStatisticsRequest,
}

impl StatisticsRequestFactory {
    pub fn new() -> Self {
        Self {
            req: GetStatisticsRequest {
                req: StatisticsPayload {
                    collection_id: 1,
                    ..Default::default()
                },
                dml_channels: vec!["dml_0_v0".to_string()],
                ..Default::default()
            },
        }
    }

    pub fn from_shard_leader(mut self) -> Self {
        self.req.from_shard_leader = true;
        self
    }

    pub fn with_collection_id(mut self, collection_id: UniqueId) -> Self {
        self.req.req.collection_id = collection_id;
        self
    }

    pub fn with_scope(mut self, scope: DataScope) -> Self {
        self.req.scope = scope;
        self
    }

    pub fn with_partition_ids(mut self, partition_ids: &[UniqueId]) -> Self {
        self.req.req.partition_ids = partition_ids.to_vec();
        self
    }

    pub fn with_segment_ids(mut self, segment_ids: &[UniqueId]) -> Self {
        self.req.segment_ids = segment_ids.to_vec();
        self
    }

    pub fn create(self) -> GetStatisticsRequest {
        self.req
    }
}
