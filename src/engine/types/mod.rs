mod requests;
mod results;
mod segment_info;

pub use requests::{
    DataScope, GetStatisticsRequest, MsgBase, QueryRequest, RetrievePayload, SearchPayload,
    SearchRequest, StatisticsPayload,
};
pub use results::{
    FieldData, RetrieveResults, SearchHit, SearchResults, SegmentStats, StatisticsResponse,
};
pub use segment_info::{
    Binlog, FieldBinlog, FieldIndexInfo, LoadScope, LoadSegmentsRequest, SegmentInfo,
    SegmentLoadInfo, VchannelInfo, WatchDmChannelsRequest,
};

pub type UniqueId = i64;
