//! # Restock Cache
//!
//! 以上傳紀錄作為新鮮度標記的資料快取

pub mod dirty_tracking;
pub mod freshness;
pub mod snapshot;

// Re-export 主要類型
pub use dirty_tracking::DirtyTracker;
pub use freshness::{has_newer_logs, latest_upload, Dataset, UploadLog};
pub use snapshot::SnapshotCache;
