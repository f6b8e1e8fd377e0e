use std::collections::HashMap;

use super::segment_info_factory::SegmentInfoFactory;
use crate::engine::types::{SegmentInfo, UniqueId, VchannelInfo, WatchDmChannelsRequest};

pub struct WatchRequestFactory {
    collection_id: UniqueId,
    channel: Option<String>,
    unflushed: Vec<UniqueId>,
    segment_infos: HashMap<UniqueId, SegmentInfo>,
    version: i64,
}

impl WatchRequestFactory {
    pub fn new() -> Self {
        Self {
            collection_id: 1,
            channel: Some("dml_0_v0".to_string()),
            unflushed: Vec::new(),
            segment_infos: HashMap::new(),
            version: 7,
        }
    }

    pub fn with_channel(mut self, channel: &str) -> Self {
        self.channel = Some(channel.to_string());
        self
    }

    pub fn without_channel(mut self) -> Self {
        self.channel = None;
        self
    }

    pub fn with_version(mut self, version: i64) -> Self {
        self.version = version;
        self
    }

    pub fn with_unflushed(mut self, segment_ids: &[UniqueId]) -> Self {
        self.unflushed.extend_from_slice(segment_ids);
        self
    }

    /// Registers a segment info carrying `binlogs` field binlogs.
    pub fn with_segment(mut self, segment_id: UniqueId, binlogs: u64) -> Self {
        let info = SegmentInfoFactory::new()
            .with("id", segment_id)
            .with("collection_id", self.collection_id)
            .with("binlogs", binlogs)
            .create();
        self.segment_infos.insert(segment_id, info);
        self
    }

    pub fn create(self) -> WatchDmChannelsRequest {
        let infos = self
            .channel
            .map(|channel_name| VchannelInfo {
                collection_id: self.collection_id,
                channel_name,
                unflushed_segment_ids: self.unflushed,
                flushed_segment_ids: Vec::new(),
            })
            .into_iter()
            .collect();

        WatchDmChannelsRequest {
            collection_id: self.collection_id,
            infos,
            segment_infos: self.segment_infos,
            version: self.version,
            ..Default::default()
        }
    }
}
