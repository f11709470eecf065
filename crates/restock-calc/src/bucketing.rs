//! 時間分桶

use chrono::NaiveDate;
use restock_core::Period;

/// 時間分桶計算器
pub struct BucketingCalculator;

impl BucketingCalculator {
    /// 創建固定週期的時間桶
    ///
    /// 從 `start` 所屬週期的起始日開始，到 `end`（含）為止的每個週期起始日。
    pub fn create_buckets(
        start: NaiveDate,
        end: NaiveDate,
        period: Period,
    ) -> restock_core::Result<Vec<NaiveDate>> {
        let mut buckets = Vec::new();
        let mut current = period.bucket_start(start);

        while current <= end {
            buckets.push(current);
            current = period.next(current)?;
        }

        Ok(buckets)
    }
}
