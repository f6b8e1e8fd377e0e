pub use super::factories::{
    CollectionFactory, LoadSegmentsRequestFactory, PlanFactory, QueryNodeFactory,
    QueryRequestFactory, RetrieveResultsFactory, SearchRequestFactory, SearchResultsFactory,
    SegmentFactory, SegmentInfoFactory, StatisticsRequestFactory, WatchRequestFactory,
};

pub struct Factory;

impl Factory {
    pub fn collection() -> CollectionFactory {
        CollectionFactory::new()
    }

    pub fn segment_info() -> SegmentInfoFactory {
        SegmentInfoFactory::new()
    }

    pub fn watch_request() -> WatchRequestFactory {
        WatchRequestFactory::new()
    }

    pub fn load_request() -> LoadSegmentsRequestFactory {
        LoadSegmentsRequestFactory::new()
    }

    pub fn search_request() -> SearchRequestFactory {
        SearchRequestFactory::new()
    }

    pub fn query_request() -> QueryRequestFactory {
        QueryRequestFactory::new()
    }

    pub fn statistics_request() -> StatisticsRequestFactory {
        StatisticsRequestFactory::new()
    }

    pub fn search_results() -> SearchResultsFactory {
        SearchResultsFactory::new()
    }

    pub fn retrieve_results() -> RetrieveResultsFactory {
        RetrieveResultsFactory::new()
    }

    pub fn query_node() -> QueryNodeFactory {
        QueryNodeFactory::new()
    }
}
