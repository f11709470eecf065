//! 物料與目錄索引

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::row::UNBRANDED;
use crate::{RestockError, Result};

/// 物料快照（單次計算期間不可變）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// 物料代碼（唯一）
    pub code: String,

    /// 描述
    pub description: String,

    /// 品牌
    pub brand: Option<String>,

    /// 產品線
    pub line: Option<String>,

    /// 現有庫存
    pub stock_current: f64,

    /// 單位成本（可能未知）
    pub unit_cost: Option<f64>,
}

impl Item {
    /// 創建新的物料
    pub fn new(code: String, description: String, stock_current: f64) -> Self {
        Self {
            code,
            description,
            brand: None,
            line: None,
            stock_current,
            unit_cost: None,
        }
    }

    /// 建構器模式：設置品牌
    pub fn with_brand(mut self, brand: String) -> Self {
        self.brand = Some(brand);
        self
    }

    /// 建構器模式：設置產品線
    pub fn with_line(mut self, line: String) -> Self {
        self.line = Some(line);
        self
    }

    /// 建構器模式：設置單位成本
    pub fn with_unit_cost(mut self, unit_cost: f64) -> Self {
        self.unit_cost = Some(unit_cost);
        self
    }

    /// 品牌名稱，空白品牌歸入 [`UNBRANDED`]
    pub fn brand_label(&self) -> &str {
        match self.brand.as_deref().map(str::trim) {
            Some(brand) if !brand.is_empty() => brand,
            _ => UNBRANDED,
        }
    }

    /// 用於估算的單位成本，未知或非有限值視為 0
    pub fn effective_unit_cost(&self) -> f64 {
        match self.unit_cost {
            Some(cost) if cost.is_finite() => cost,
            _ => 0.0,
        }
    }
}

/// 物料目錄索引（依代碼排序）
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    items: BTreeMap<String, Item>,
    duplicates: Vec<String>,
}

impl CatalogIndex {
    /// 由物料清單建立索引
    ///
    /// 重複代碼保留第一筆，其餘記錄在 [`CatalogIndex::duplicates`]。
    pub fn build(items: &[Item]) -> Self {
        let mut index = Self::default();
        for item in items {
            if index.items.contains_key(&item.code) {
                index.duplicates.push(item.code.clone());
                continue;
            }
            index.items.insert(item.code.clone(), item.clone());
        }
        index
    }

    pub fn get(&self, code: &str) -> Option<&Item> {
        self.items.get(code)
    }

    /// 查找物料，找不到時返回 `MissingCatalogEntry`
    pub fn require(&self, code: &str) -> Result<&Item> {
        self.items
            .get(code)
            .ok_or_else(|| RestockError::MissingCatalogEntry(code.to_string()))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.items.contains_key(code)
    }

    /// 依代碼遞增順序迭代
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 建立索引時被忽略的重複代碼
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_item() {
        let item = Item::new("FIL-001".to_string(), "Filtro de aceite".to_string(), 40.0)
            .with_brand("Acme".to_string())
            .with_unit_cost(12.5);

        assert_eq!(item.code, "FIL-001");
        assert_eq!(item.brand_label(), "Acme");
        assert_eq!(item.effective_unit_cost(), 12.5);
        assert_eq!(item.line, None);
    }

    #[test]
    fn test_blank_brand_is_unbranded() {
        let blank = Item::new("A".to_string(), String::new(), 1.0).with_brand("   ".to_string());
        let missing = Item::new("B".to_string(), String::new(), 1.0);

        assert_eq!(blank.brand_label(), UNBRANDED);
        assert_eq!(missing.brand_label(), UNBRANDED);
    }

    #[test]
    fn test_missing_or_invalid_cost_is_zero() {
        let missing = Item::new("A".to_string(), String::new(), 1.0);
        let nan = Item::new("B".to_string(), String::new(), 1.0).with_unit_cost(f64::NAN);

        assert_eq!(missing.effective_unit_cost(), 0.0);
        assert_eq!(nan.effective_unit_cost(), 0.0);
    }

    #[test]
    fn test_catalog_keeps_first_duplicate() {
        let items = vec![
            Item::new("B".to_string(), "first".to_string(), 1.0),
            Item::new("A".to_string(), "alpha".to_string(), 2.0),
            Item::new("B".to_string(), "second".to_string(), 3.0),
        ];

        let index = CatalogIndex::build(&items);

        assert_eq!(index.len(), 2);
        assert_eq!(index.get("B").unwrap().description, "first");
        assert_eq!(index.duplicates(), &["B".to_string()]);

        let codes: Vec<&str> = index.iter().map(|i| i.code.as_str()).collect();
        assert_eq!(codes, vec!["A", "B"]);
    }

    #[test]
    fn test_require_missing_entry() {
        let index = CatalogIndex::build(&[]);

        assert!(index.is_empty());
        assert!(matches!(
            index.require("GHOST"),
            Err(RestockError::MissingCatalogEntry(code)) if code == "GHOST"
        ));
    }
}
