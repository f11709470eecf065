//! 品牌彙總

use restock_core::{BrandSummaryRow, ReplenishmentRow};
use std::collections::BTreeMap;

/// 品牌彙總計算器
pub struct BrandRollup;

impl BrandRollup {
    /// 彙總需要採購的建議，依總成本遞減排序，成本相同時依品牌名稱遞增
    pub fn summarize(rows: &[ReplenishmentRow]) -> Vec<BrandSummaryRow> {
        let mut grouped: BTreeMap<&str, BrandSummaryRow> = BTreeMap::new();
        for row in rows.iter().filter(|row| row.should_buy) {
            grouped
                .entry(row.brand.as_str())
                .or_insert_with(|| BrandSummaryRow::new(row.brand.clone()))
                .add(row);
        }

        let mut summary: Vec<BrandSummaryRow> = grouped.into_values().collect();
        summary.sort_by(|a, b| b.cost.total_cmp(&a.cost).then_with(|| a.brand.cmp(&b.brand)));
        summary
    }
}
