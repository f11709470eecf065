//! 覆蓋月數與建議採購量

use restock_core::{Item, ReplenishmentConfig, ReplenishmentRow};
use std::cmp::Ordering;

/// 覆蓋與建議計算器
pub struct CoverageCalculator;

impl CoverageCalculator {
    /// 計算單一物料的補貨建議
    ///
    /// 覆蓋月數低於（不含等於）提前期 + 緩衝時才建議採購，
    /// 採購量補足到 `消耗 × 目標覆蓋月數`。沒有消耗的物料覆蓋月數為無限，
    /// 不論庫存多少都不會觸發採購。
    pub fn evaluate(
        item: &Item,
        consumption_monthly: f64,
        config: &ReplenishmentConfig,
    ) -> ReplenishmentRow {
        let stock_current = item.stock_current;
        let months_coverage = Self::months_coverage(stock_current, consumption_monthly);
        let min_coverage_months = config.min_coverage_months();
        let should_buy = months_coverage < min_coverage_months;

        let qty_to_buy = if should_buy {
            let target_stock = consumption_monthly * config.target_coverage_months;
            (target_stock - stock_current).max(0.0)
        } else {
            0.0
        };
        let cost_estimate = qty_to_buy * item.effective_unit_cost();

        ReplenishmentRow {
            code: item.code.clone(),
            description: item.description.clone(),
            brand: item.brand_label().to_string(),
            stock_current,
            consumption_monthly,
            months_coverage,
            min_coverage_months,
            qty_to_buy,
            cost_estimate,
            should_buy,
        }
    }

    /// 覆蓋月數：庫存 ÷ 月均消耗，無消耗時為正無窮
    pub fn months_coverage(stock_current: f64, consumption_monthly: f64) -> f64 {
        if consumption_monthly > 0.0 {
            stock_current / consumption_monthly
        } else {
            f64::INFINITY
        }
    }

    /// 排序建議：採購量遞減，其次覆蓋月數遞增，最後代碼遞增
    pub fn sort_rows(rows: &mut [ReplenishmentRow]) {
        rows.sort_by(Self::compare_rows);
    }

    fn compare_rows(a: &ReplenishmentRow, b: &ReplenishmentRow) -> Ordering {
        b.qty_to_buy
            .total_cmp(&a.qty_to_buy)
            .then_with(|| a.months_coverage.total_cmp(&b.months_coverage))
            .then_with(|| a.code.cmp(&b.code))
    }
}
