mod directory;
mod traits;

pub use directory::DelegatorDirectory;
pub use traits::{SegmentEntry, ShardDelegator, SnapshotItem};
