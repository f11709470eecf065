//! 庫存趨勢序列（分析圖表）

use chrono::NaiveDate;
use restock_core::{CatalogIndex, MovementRecord, Period};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::bucketing::BucketingCalculator;

/// 序列查詢條件
#[derive(Debug, Clone)]
pub struct SeriesQuery {
    /// 分桶週期
    pub period: Period,

    /// 起始日期（含）
    pub start: Option<NaiveDate>,

    /// 結束日期（含）
    pub end: Option<NaiveDate>,

    /// 物料範圍
    pub items: Option<BTreeSet<String>>,
}

impl SeriesQuery {
    pub fn new(period: Period) -> Self {
        Self {
            period,
            start: None,
            end: None,
            items: None,
        }
    }

    /// 建構器模式：設置日期範圍
    pub fn with_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// 建構器模式：限制物料範圍
    pub fn with_items(mut self, items: BTreeSet<String>) -> Self {
        self.items = Some(items);
        self
    }

    fn includes(&self, code: &str) -> bool {
        self.items.as_ref().map_or(true, |set| set.contains(code))
    }
}

/// 庫存數量與金額的累計序列
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventorySeries {
    /// 週期起始日
    pub dates: Vec<NaiveDate>,
    /// 各週期結束時的累計數量
    pub units_series: Vec<f64>,
    /// 各週期結束時的累計金額
    pub value_series: Vec<f64>,
}

impl InventorySeries {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// 序列計算器
pub struct SeriesCalculator;

impl SeriesCalculator {
    /// 建立庫存趨勢序列
    ///
    /// 起始日期之前的異動累計為期初餘額。金額以目錄單位成本計算，
    /// 目錄中沒有的物料只計數量。範圍內沒有任何異動時返回 `None`。
    pub fn build(
        movements: &[MovementRecord],
        catalog: &CatalogIndex,
        query: &SeriesQuery,
    ) -> restock_core::Result<Option<InventorySeries>> {
        let mut opening_units = 0.0;
        let mut opening_value = 0.0;
        let mut in_range: Vec<&MovementRecord> = Vec::new();

        for movement in movements.iter().filter(|m| query.includes(&m.item_code)) {
            if query.start.is_some_and(|start| movement.date < start) {
                opening_units += movement.quantity;
                opening_value += Self::movement_value(movement, catalog);
            } else if query.end.map_or(true, |end| movement.date <= end) {
                in_range.push(movement);
            }
        }

        if in_range.is_empty() {
            return Ok(None);
        }
        let (Some(first), Some(last)) = (
            query.start.or_else(|| in_range.iter().map(|m| m.date).min()),
            query.end.or_else(|| in_range.iter().map(|m| m.date).max()),
        ) else {
            return Ok(None);
        };

        let mut deltas: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
        for movement in &in_range {
            let entry = deltas
                .entry(query.period.bucket_start(movement.date))
                .or_insert((0.0, 0.0));
            entry.0 += movement.quantity;
            entry.1 += Self::movement_value(movement, catalog);
        }

        let dates = BucketingCalculator::create_buckets(first, last, query.period)?;
        tracing::debug!("庫存序列: {} 個時間桶，{} 筆異動", dates.len(), in_range.len());

        let mut units = opening_units;
        let mut value = opening_value;
        let mut units_series = Vec::with_capacity(dates.len());
        let mut value_series = Vec::with_capacity(dates.len());
        for date in &dates {
            if let Some((du, dv)) = deltas.get(date) {
                units += du;
                value += dv;
            }
            units_series.push(units);
            value_series.push(value);
        }

        Ok(Some(InventorySeries {
            dates,
            units_series,
            value_series,
        }))
    }

    fn movement_value(movement: &MovementRecord, catalog: &CatalogIndex) -> f64 {
        let cost = catalog
            .get(&movement.item_code)
            .map_or(0.0, |item| item.effective_unit_cost());
        movement.quantity * cost
    }
}
