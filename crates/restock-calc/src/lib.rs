//! # Restock Calculation Engine
//!
//! 需求彙總與補貨建議計算引擎

pub mod bucketing;
pub mod calculator;
pub mod consumption;
pub mod coverage;
pub mod distribution;
pub mod rollup;
pub mod series;

use chrono::NaiveDate;
use restock_core::{BrandSummaryRow, ReplenishmentRow};
use serde::Serialize;

// Re-export 主要類型
pub use bucketing::BucketingCalculator;
pub use calculator::ReplenishmentCalculator;
pub use consumption::ConsumptionCalculator;
pub use coverage::CoverageCalculator;
pub use distribution::{DistributionCalculator, LineShare};
pub use rollup::BrandRollup;
pub use series::{InventorySeries, SeriesCalculator, SeriesQuery};

/// 補貨計算結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplenishmentResult {
    /// 單物料建議（採購量遞減排序）
    pub rows: Vec<ReplenishmentRow>,

    /// 品牌彙總（成本遞減排序）
    pub brand_rows: Vec<BrandSummaryRow>,

    /// 實際使用的基準日期（無異動且未設置時為 None）
    pub reference_date: Option<NaiveDate>,

    /// 警告信息
    pub warnings: Vec<RestockWarning>,
}

impl ReplenishmentResult {
    /// 創建空的計算結果
    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            brand_rows: Vec::new(),
            reference_date: None,
            warnings: Vec::new(),
        }
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: RestockWarning) {
        self.warnings.push(warning);
    }

    /// 需要採購的建議
    pub fn rows_to_buy(&self) -> impl Iterator<Item = &ReplenishmentRow> {
        self.rows.iter().filter(|row| row.should_buy)
    }

    /// 估算總成本
    pub fn total_cost(&self) -> f64 {
        self.brand_rows.iter().map(|b| b.cost).sum()
    }
}

/// 計算警告
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestockWarning {
    pub item_code: String,
    pub message: String,
    pub severity: WarningSeverity,
}

impl RestockWarning {
    pub fn new(item_code: String, message: String, severity: WarningSeverity) -> Self {
        Self {
            item_code,
            message,
            severity,
        }
    }

    pub fn info(item_code: String, message: String) -> Self {
        Self::new(item_code, message, WarningSeverity::Info)
    }

    pub fn warning(item_code: String, message: String) -> Self {
        Self::new(item_code, message, WarningSeverity::Warning)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WarningSeverity {
    Info,
    Warning,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_totals_and_json_shape() {
        let mut result = ReplenishmentResult::empty();
        let mut acme = BrandSummaryRow::new("Acme".to_string());
        acme.cost = 400.0;
        let mut other = BrandSummaryRow::new("Zeta".to_string());
        other.cost = 25.5;
        result.brand_rows = vec![acme, other];
        result.add_warning(RestockWarning::warning("X".to_string(), "略過".to_string()));

        assert_eq!(result.total_cost(), 425.5);
        assert_eq!(result.rows_to_buy().count(), 0);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["warnings"][0]["severity"], "Warning");
        assert!(json["reference_date"].is_null());
        assert_eq!(json["brand_rows"][0]["brand"], "Acme");
    }
}
