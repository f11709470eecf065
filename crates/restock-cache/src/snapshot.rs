//! 以上傳紀錄為新鮮度標記的快照快取

use crate::dirty_tracking::DirtyTracker;
use crate::freshness::{has_newer_logs, UploadLog};

/// 快取內容與建立時的上傳紀錄
#[derive(Debug, Clone)]
struct CachedSnapshot<T> {
    payload: T,
    logs: Vec<UploadLog>,
}

/// 快照快取
///
/// 只要資料來源沒有比建立快照時更新的上傳，快照就仍然有效。
#[derive(Debug, Clone)]
pub struct SnapshotCache<T> {
    entry: Option<CachedSnapshot<T>>,
}

impl<T> Default for SnapshotCache<T> {
    fn default() -> Self {
        Self { entry: None }
    }
}

impl<T> SnapshotCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 儲存快照，覆蓋舊內容
    pub fn store(&mut self, payload: T, logs: Vec<UploadLog>) {
        tracing::debug!("儲存快照，上傳紀錄 {} 筆", logs.len());
        self.entry = Some(CachedSnapshot { payload, logs });
    }

    /// 取得仍然新鮮的快照
    pub fn lookup(&self, fetched: &[UploadLog]) -> Option<&T> {
        let entry = self.entry.as_ref()?;
        if has_newer_logs(&entry.logs, fetched) {
            tracing::debug!("快照已過期");
            return None;
        }
        Some(&entry.payload)
    }

    /// 需要重新讀取的資料表
    ///
    /// 沒有快照時所有出現在紀錄中的資料表都需要讀取。
    pub fn stale_datasets(&self, fetched: &[UploadLog]) -> DirtyTracker {
        let cached = self.entry.as_ref().map_or(&[][..], |entry| &entry.logs[..]);
        DirtyTracker::from_logs(cached, fetched)
    }

    /// 明確使快照失效
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }

    /// 快照建立時的上傳紀錄
    pub fn logs(&self) -> &[UploadLog] {
        self.entry.as_ref().map_or(&[][..], |entry| &entry.logs[..])
    }
}
