//! 補貨建議結果模型

use serde::Serialize;

/// 無品牌物料的彙總名稱
pub const UNBRANDED: &str = "Unbranded";

/// 單物料補貨建議（每次計算重新產生）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplenishmentRow {
    /// 物料代碼
    pub code: String,

    /// 描述
    pub description: String,

    /// 品牌（空白時為 [`UNBRANDED`]）
    pub brand: String,

    /// 現有庫存
    pub stock_current: f64,

    /// 月均消耗
    pub consumption_monthly: f64,

    /// 覆蓋月數（無消耗時為正無窮，序列化為 null）
    pub months_coverage: f64,

    /// 最低可接受覆蓋月數
    pub min_coverage_months: f64,

    /// 建議採購數量
    pub qty_to_buy: f64,

    /// 估算成本
    pub cost_estimate: f64,

    /// 是否需要採購
    pub should_buy: bool,
}

impl ReplenishmentRow {
    /// 檢查是否沒有消耗（覆蓋月數無限）
    pub fn has_infinite_coverage(&self) -> bool {
        self.months_coverage.is_infinite()
    }
}

/// 品牌採購彙總
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandSummaryRow {
    /// 品牌
    pub brand: String,

    /// 需採購的物料數
    pub items: usize,

    /// 建議採購總量
    pub qty: f64,

    /// 估算總成本
    pub cost: f64,
}

impl BrandSummaryRow {
    /// 創建空的品牌彙總
    pub fn new(brand: String) -> Self {
        Self {
            brand,
            items: 0,
            qty: 0.0,
            cost: 0.0,
        }
    }

    /// 累加一筆建議
    pub fn add(&mut self, row: &ReplenishmentRow) {
        self.items += 1;
        self.qty += row.qty_to_buy;
        self.cost += row.cost_estimate;
    }
}
