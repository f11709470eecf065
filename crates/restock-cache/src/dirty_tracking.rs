//! 髒標記追蹤

use std::collections::BTreeSet;

use crate::freshness::{latest_upload, Dataset, UploadLog};

/// 髒標記追蹤器（記錄需要重新讀取的資料表）
#[derive(Debug, Clone, Default)]
pub struct DirtyTracker {
    dirty: BTreeSet<Dataset>,
}

impl DirtyTracker {
    /// 創建新的追蹤器
    pub fn new() -> Self {
        Self::default()
    }

    /// 比對兩組上傳紀錄，標記有較新上傳的資料表
    pub fn from_logs(cached: &[UploadLog], fetched: &[UploadLog]) -> Self {
        let mut tracker = Self::new();
        for dataset in Dataset::ALL {
            let newest = latest_upload(fetched, Some(dataset));
            let known = latest_upload(cached, Some(dataset));
            if let Some(newest) = newest {
                if known.map_or(true, |known| newest > known) {
                    tracker.mark_dirty(dataset);
                }
            }
        }
        tracker
    }

    /// 標記資料表為髒
    pub fn mark_dirty(&mut self, dataset: Dataset) {
        self.dirty.insert(dataset);
    }

    /// 檢查資料表是否為髒
    pub fn is_dirty(&self, dataset: Dataset) -> bool {
        self.dirty.contains(&dataset)
    }

    pub fn is_clean(&self) -> bool {
        self.dirty.is_empty()
    }

    /// 清除所有髒標記
    pub fn clear(&mut self) {
        self.dirty.clear();
    }

    /// 獲取所有髒資料表（固定順序）
    pub fn dirty_datasets(&self) -> Vec<Dataset> {
        self.dirty.iter().copied().collect()
    }
}
