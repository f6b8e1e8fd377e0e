use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::segment::LocalSegment;
use crate::engine::errors::LoadError;
use crate::engine::types::{FieldBinlog, SegmentLoadInfo, UniqueId};

/// Storage collaborator that materializes segment data on this node.
#[async_trait]
pub trait SegmentLoader: Send + Sync {
    /// Loads new sealed segments and registers them; returns the loaded IDs.
    async fn load_segments(
        &self,
        cancel: &CancellationToken,
        collection_id: UniqueId,
        infos: &[SegmentLoadInfo],
        version: i64,
    ) -> Result<Vec<UniqueId>, LoadError>;

    async fn load_delta_logs(
        &self,
        cancel: &CancellationToken,
        segment: &LocalSegment,
        deltalogs: &[FieldBinlog],
    ) -> Result<(), LoadError>;

    async fn load_index(
        &self,
        cancel: &CancellationToken,
        segment: &LocalSegment,
        info: &SegmentLoadInfo,
        version: i64,
    ) -> Result<(), LoadError>;
}
