//! 補貨計算配置

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::calendar::months_before;
use crate::{RestockError, Result};

/// 歷史視窗上限（月）
pub const MAX_MONTHS_WINDOW: u32 = 1200;

/// 補貨計算參數（每次計算由呼叫方提供）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplenishmentConfig {
    /// 歷史視窗長度（月）
    pub months_window: u32,

    /// 目標覆蓋月數
    pub target_coverage_months: f64,

    /// 補貨提前期（月）
    pub lead_time_months: f64,

    /// 安全緩衝（月）
    pub buffer_months: f64,

    /// 只計算這些物料（None 表示全部）
    pub selected_items: Option<BTreeSet<String>>,

    /// 只考慮這些異動原因（None 表示全部）
    pub selected_motives: Option<BTreeSet<String>>,

    /// 基準日期
    ///
    /// 未設置時使用輸入中最新的異動日期，使計算只依賴輸入資料。
    pub reference_date: Option<NaiveDate>,
}

impl Default for ReplenishmentConfig {
    fn default() -> Self {
        Self {
            months_window: 12,
            target_coverage_months: 12.0,
            lead_time_months: 1.5,
            buffer_months: 3.0,
            selected_items: None,
            selected_motives: None,
            reference_date: None,
        }
    }
}

impl ReplenishmentConfig {
    /// 創建新的配置，其餘參數使用預設值
    pub fn new(months_window: u32) -> Self {
        Self {
            months_window,
            ..Self::default()
        }
    }

    /// 建構器模式：設置目標覆蓋月數
    pub fn with_target_coverage_months(mut self, months: f64) -> Self {
        self.target_coverage_months = months;
        self
    }

    /// 建構器模式：設置提前期
    pub fn with_lead_time_months(mut self, months: f64) -> Self {
        self.lead_time_months = months;
        self
    }

    /// 建構器模式：設置安全緩衝
    pub fn with_buffer_months(mut self, months: f64) -> Self {
        self.buffer_months = months;
        self
    }

    /// 建構器模式：限制物料範圍
    pub fn with_selected_items<I>(mut self, codes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.selected_items = Some(codes.into_iter().map(Into::into).collect());
        self
    }

    /// 建構器模式：限制異動原因
    pub fn with_selected_motives<I>(mut self, motives: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.selected_motives = Some(motives.into_iter().map(Into::into).collect());
        self
    }

    /// 建構器模式：設置基準日期
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    /// 從 JSON 解析並驗證配置
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| RestockError::InvalidConfiguration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 驗證參數範圍
    pub fn validate(&self) -> Result<()> {
        if self.months_window == 0 {
            return Err(RestockError::InvalidConfiguration(
                "months_window 必須大於 0".to_string(),
            ));
        }
        if self.months_window > MAX_MONTHS_WINDOW {
            return Err(RestockError::InvalidConfiguration(format!(
                "months_window 不可超過 {}，實際為 {}",
                MAX_MONTHS_WINDOW, self.months_window
            )));
        }
        if let Some(date) = self.reference_date {
            months_before(date, self.months_window).map_err(|_| {
                RestockError::InvalidConfiguration(format!(
                    "基準日期 {} 往前 {} 個月超出日期範圍",
                    date, self.months_window
                ))
            })?;
        }

        let months = [
            ("target_coverage_months", self.target_coverage_months),
            ("lead_time_months", self.lead_time_months),
            ("buffer_months", self.buffer_months),
        ];
        for (name, value) in months {
            if !value.is_finite() || value < 0.0 {
                return Err(RestockError::InvalidConfiguration(format!(
                    "{} 必須是非負數，實際為 {}",
                    name, value
                )));
            }
        }

        Ok(())
    }

    /// 最低可接受覆蓋月數（提前期 + 緩衝）
    pub fn min_coverage_months(&self) -> f64 {
        self.lead_time_months + self.buffer_months
    }

    /// 檢查物料是否在計算範圍內
    pub fn includes_item(&self, code: &str) -> bool {
        self.selected_items
            .as_ref()
            .map_or(true, |set| set.contains(code))
    }

    /// 檢查異動原因是否在計算範圍內
    pub fn includes_motive(&self, motive: &str) -> bool {
        self.selected_motives
            .as_ref()
            .map_or(true, |set| set.contains(motive))
    }
}
