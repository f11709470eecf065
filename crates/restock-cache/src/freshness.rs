//! 上傳紀錄與新鮮度判斷

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 可上傳的資料表
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
    /// 庫存異動
    Movements,
    /// 銷售
    Sales,
    /// 物料清單
    Items,
    /// 物料目錄
    Catalog,
}

impl Dataset {
    pub const ALL: [Dataset; 4] = [
        Dataset::Movements,
        Dataset::Sales,
        Dataset::Items,
        Dataset::Catalog,
    ];

    /// 對應的資料表名稱
    pub fn table_name(self) -> &'static str {
        match self {
            Dataset::Movements => "movimientos",
            Dataset::Sales => "ventas",
            Dataset::Items => "listado_items",
            Dataset::Catalog => "catalogo_items",
        }
    }
}

/// 上傳紀錄
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadLog {
    /// 資料表
    pub dataset: Dataset,

    /// 上傳檔名
    pub file_name: String,

    /// 上傳時間
    pub uploaded_at: DateTime<Utc>,
}

impl UploadLog {
    pub fn new(dataset: Dataset, file_name: String, uploaded_at: DateTime<Utc>) -> Self {
        Self {
            dataset,
            file_name,
            uploaded_at,
        }
    }
}

/// 最新上傳時間（可限定資料表）
pub fn latest_upload(logs: &[UploadLog], dataset: Option<Dataset>) -> Option<DateTime<Utc>> {
    logs.iter()
        .filter(|log| dataset.map_or(true, |d| log.dataset == d))
        .map(|log| log.uploaded_at)
        .max()
}

/// 檢查是否有比快取更新的上傳
///
/// 快取沒有任何紀錄而新紀錄不為空時也視為有更新。
pub fn has_newer_logs(cached: &[UploadLog], fetched: &[UploadLog]) -> bool {
    match (latest_upload(cached, None), latest_upload(fetched, None)) {
        (_, None) => false,
        (None, Some(_)) => true,
        (Some(cached_at), Some(fetched_at)) => fetched_at > cached_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn log(dataset: Dataset, hour: u32) -> UploadLog {
        UploadLog::new(
            dataset,
            format!("{}.xlsx", dataset.table_name()),
            Utc.with_ymd_and_hms(2025, 11, 20, hour, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_latest_upload_per_dataset() {
        let logs = vec![
            log(Dataset::Movements, 9),
            log(Dataset::Items, 11),
            log(Dataset::Movements, 10),
        ];

        assert_eq!(latest_upload(&logs, None), Some(log(Dataset::Items, 11).uploaded_at));
        assert_eq!(
            latest_upload(&logs, Some(Dataset::Movements)),
            Some(log(Dataset::Movements, 10).uploaded_at)
        );
        assert_eq!(latest_upload(&logs, Some(Dataset::Catalog)), None);
    }

    #[rstest]
    #[case(vec![log(Dataset::Movements, 9)], vec![log(Dataset::Items, 10)], true)]
    #[case(vec![log(Dataset::Movements, 9)], vec![log(Dataset::Items, 9)], false)]
    #[case(vec![log(Dataset::Movements, 9)], vec![log(Dataset::Items, 8)], false)]
    #[case(vec![log(Dataset::Movements, 9)], vec![], false)]
    #[case(vec![], vec![log(Dataset::Movements, 9)], true)]
    #[case(vec![], vec![], false)]
    fn test_has_newer_logs(
        #[case] cached: Vec<UploadLog>,
        #[case] fetched: Vec<UploadLog>,
        #[case] expected: bool,
    ) {
        assert_eq!(has_newer_logs(&cached, &fetched), expected);
    }
}
