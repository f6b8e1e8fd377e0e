pub mod collection_factory;
pub mod plan_factory;
pub mod query_node_factory;
pub mod request_factory;
pub mod result_factory;
pub mod segment_factory;
pub mod watch_request_factory;

pub use collection_factory::CollectionFactory;
pub use load_request_factory::LoadSegmentsRequestFactory;
pub use plan_factory::PlanFactory;
pub use query_node_factory::QueryNodeFactory;
pub use request_factory::{QueryRequestFactory, SearchRequestFactory, StatisticsRequestFactory};
pub use result_factory::{RetrieveResultsFactory, SearchResultsFactory};
pub use segment_factory::SegmentFactory;
pub use segment_info_factory::SegmentInfoFactory;
pub use watch_request_factory::WatchRequestFactory;
