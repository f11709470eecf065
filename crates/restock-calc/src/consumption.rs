//! 需求彙總：歷史出庫轉換為月均消耗

use chrono::NaiveDate;
use restock_core::{months_before, CatalogIndex, MovementRecord, ReplenishmentConfig, RestockError};
use std::collections::{BTreeMap, BTreeSet};

/// 月均消耗計算器
pub struct ConsumptionCalculator;

impl ConsumptionCalculator {
    /// 計算各物料的月均消耗
    ///
    /// 只統計 `[reference_date - months_window, reference_date]`（含兩端）內、
    /// 通過物料與原因篩選的異動。出庫數量按物料加總後除以視窗月數；
    /// 只有入庫的物料仍會出現，消耗為 0。視窗內沒有異動的物料不在結果中。
    /// 視窗內出現非有限數量時返回 [`RestockError::CalculationError`]。
    pub fn monthly_rates(
        movements: &[MovementRecord],
        months_window: u32,
        reference_date: NaiveDate,
        selected_items: Option<&BTreeSet<String>>,
        selected_motives: Option<&BTreeSet<String>>,
    ) -> restock_core::Result<BTreeMap<String, f64>> {
        if months_window == 0 {
            return Err(RestockError::InvalidConfiguration(
                "months_window 必須大於 0".to_string(),
            ));
        }

        let window_start = months_before(reference_date, months_window)?;
        tracing::debug!(
            "消耗視窗: {} ~ {}（{} 個月）",
            window_start,
            reference_date,
            months_window
        );

        let mut consumed: BTreeMap<String, f64> = BTreeMap::new();
        for movement in movements {
            if movement.date < window_start || movement.date > reference_date {
                continue;
            }
            if selected_items.is_some_and(|set| !set.contains(&movement.item_code)) {
                continue;
            }
            if selected_motives.is_some_and(|set| !set.contains(&movement.motive)) {
                continue;
            }
            if !movement.quantity.is_finite() {
                return Err(RestockError::CalculationError(format!(
                    "物料 {} 於 {} 的異動數量無效",
                    movement.item_code, movement.date
                )));
            }

            *consumed.entry(movement.item_code.clone()).or_insert(0.0) += movement.consumed_qty();
        }

        let months = f64::from(months_window);
        Ok(consumed
            .into_iter()
            .map(|(code, qty)| (code, qty / months))
            .collect())
    }

    /// 依配置計算月均消耗
    pub fn from_config(
        movements: &[MovementRecord],
        config: &ReplenishmentConfig,
        reference_date: NaiveDate,
    ) -> restock_core::Result<BTreeMap<String, f64>> {
        Self::monthly_rates(
            movements,
            config.months_window,
            reference_date,
            config.selected_items.as_ref(),
            config.selected_motives.as_ref(),
        )
    }

    /// 決定基準日期：優先使用配置，否則取最新異動日期
    ///
    /// 只考慮通過物料與原因篩選、且物料在目錄中的異動，
    /// 被略過的異動不會移動消耗視窗。
    pub fn resolve_reference_date(
        movements: &[MovementRecord],
        config: &ReplenishmentConfig,
        catalog: &CatalogIndex,
    ) -> Option<NaiveDate> {
        config.reference_date.or_else(|| {
            movements
                .iter()
                .filter(|m| config.includes_item(&m.item_code))
                .filter(|m| config.includes_motive(&m.motive))
                .filter(|m| catalog.contains(&m.item_code))
                .map(|m| m.date)
                .max()
        })
    }
}
