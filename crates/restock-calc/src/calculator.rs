//! 補貨主計算器

use restock_core::{CatalogIndex, Item, MovementRecord, ReplenishmentConfig};
use std::collections::BTreeMap;

use crate::consumption::ConsumptionCalculator;
use crate::coverage::CoverageCalculator;
use crate::rollup::BrandRollup;
use crate::{ReplenishmentResult, RestockWarning};

/// 補貨計算器
///
/// 只持有本次計算的配置，計算結果完全由輸入的物料、異動與配置決定。
#[derive(Debug, Clone)]
pub struct ReplenishmentCalculator {
    config: ReplenishmentConfig,
}

impl ReplenishmentCalculator {
    /// 創建新的補貨計算器
    pub fn new(config: ReplenishmentConfig) -> Self {
        Self { config }
    }

    /// 主補貨計算入口
    pub fn calculate(
        &self,
        items: &[Item],
        movements: &[MovementRecord],
    ) -> restock_core::Result<ReplenishmentResult> {
        tracing::info!(
            "開始補貨計算：物料 {} 筆，異動 {} 筆",
            items.len(),
            movements.len()
        );

        let start_time = std::time::Instant::now();

        // Step 1: 驗證配置（任何參數錯誤都不產生部分結果）
        self.config.validate()?;

        let mut result = ReplenishmentResult::empty();

        // Step 2: 建立物料目錄
        tracing::debug!("Step 2: 建立物料目錄");
        let catalog = CatalogIndex::build(items);
        for code in catalog.duplicates() {
            result.add_warning(RestockWarning::info(
                code.clone(),
                "目錄中有重複代碼，保留第一筆".to_string(),
            ));
        }

        // Step 3: 需求彙總
        tracing::debug!("Step 3: 需求彙總");
        let reference_date =
            ConsumptionCalculator::resolve_reference_date(movements, &self.config, &catalog);
        result.reference_date = reference_date;
        let rates = match reference_date {
            Some(date) => ConsumptionCalculator::from_config(movements, &self.config, date)?,
            None => BTreeMap::new(),
        };
        tracing::debug!("有消耗記錄的物料數量: {}", rates.len());

        // Step 4: 略過目錄中不存在的物料
        for code in rates.keys() {
            if let Err(err) = catalog.require(code) {
                tracing::warn!("略過異動: {}", err);
                result.add_warning(RestockWarning::warning(code.clone(), err.to_string()));
            }
        }

        // Step 5: 逐物料計算覆蓋與建議
        tracing::debug!("Step 5: 覆蓋與建議");
        let mut rows: Vec<_> = catalog
            .iter()
            .filter(|item| self.config.includes_item(&item.code))
            .map(|item| {
                let consumption = rates.get(&item.code).copied().unwrap_or(0.0);
                CoverageCalculator::evaluate(item, consumption, &self.config)
            })
            .collect();
        CoverageCalculator::sort_rows(&mut rows);

        // Step 6: 品牌彙總
        tracing::debug!("Step 6: 品牌彙總");
        result.brand_rows = BrandRollup::summarize(&rows);
        result.rows = rows;

        tracing::info!("補貨計算完成，耗時 {:?}", start_time.elapsed());
        tracing::info!(
            "建議採購物料: {} 筆，品牌: {} 個",
            result.rows_to_buy().count(),
            result.brand_rows.len()
        );

        Ok(result)
    }

    /// 獲取配置引用
    pub fn config(&self) -> &ReplenishmentConfig {
        &self.config
    }
}
