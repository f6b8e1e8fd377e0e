pub mod collection;
pub mod loader;
pub mod manager;
pub mod reducer;
pub mod segment;
pub mod statistics;
pub mod stream;

pub use collection::{Collection, CollectionManager, CollectionSchema, FieldSchema};
pub use loader::SegmentLoader;
pub use manager::{Manager, PinnedSegments, SegmentManager};
pub use reducer::{
    InternalQueryReducer, QueryReducer, SearchReducer, TopKSearchReducer, create_internal_reducer,
};
pub use segment::{L0Segment, LocalSegment, Segment, SegmentType};
pub use statistics::collect_segment_stats;
pub use stream::{ChannelStreamSink, QueryStreamSink};
