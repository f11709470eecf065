//! 產品線庫存分佈

use restock_core::CatalogIndex;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// 未指定產品線的名稱
pub const NO_LINE: &str = "Sin linea";

/// 合併尾部產品線的名稱
pub const OTHER_LINES: &str = "Otros";

/// 保留的產品線數量（其餘併入 [`OTHER_LINES`]）
pub const MAX_LINES: usize = 8;

/// 產品線佔比
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineShare {
    pub line: String,
    pub stock: f64,
}

/// 分佈計算器
pub struct DistributionCalculator;

impl DistributionCalculator {
    /// 依產品線加總現有庫存
    ///
    /// 負庫存不計入。依庫存遞減排序（相同時依名稱），超過 [`MAX_LINES`]
    /// 的部分合併為 [`OTHER_LINES`]。沒有任何正庫存時返回 `None`。
    pub fn by_line(
        catalog: &CatalogIndex,
        selected: Option<&BTreeSet<String>>,
    ) -> Option<Vec<LineShare>> {
        let mut totals: BTreeMap<String, f64> = BTreeMap::new();
        for item in catalog.iter() {
            if selected.is_some_and(|set| !set.contains(&item.code)) {
                continue;
            }
            let line = match item.line.as_deref().map(str::trim) {
                Some(line) if !line.is_empty() => line.to_string(),
                _ => NO_LINE.to_string(),
            };
            *totals.entry(line).or_insert(0.0) += item.stock_current.max(0.0);
        }

        let mut shares: Vec<LineShare> = totals
            .into_iter()
            .filter(|(_, stock)| *stock > 0.0)
            .map(|(line, stock)| LineShare { line, stock })
            .collect();
        if shares.is_empty() {
            return None;
        }
        shares.sort_by(|a, b| b.stock.total_cmp(&a.stock).then_with(|| a.line.cmp(&b.line)));

        if shares.len() > MAX_LINES {
            let rest: f64 = shares.drain(MAX_LINES..).map(|s| s.stock).sum();
            shares.push(LineShare {
                line: OTHER_LINES.to_string(),
                stock: rest,
            });
        }

        Some(shares)
    }
}
