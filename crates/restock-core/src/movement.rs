//! 庫存異動模型

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 異動方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementDirection {
    /// 入庫（增加庫存）
    Inbound,
    /// 出庫/消耗（減少庫存）
    Outbound,
}

/// 庫存異動記錄（唯讀輸入）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementRecord {
    /// 物料代碼
    pub item_code: String,

    /// 數量（正數入庫，負數出庫）
    pub quantity: f64,

    /// 異動原因代碼
    pub motive: String,

    /// 異動日期
    pub date: NaiveDate,
}

impl MovementRecord {
    /// 創建新的異動記錄
    pub fn new(item_code: String, quantity: f64, motive: String, date: NaiveDate) -> Self {
        Self {
            item_code,
            quantity,
            motive,
            date,
        }
    }

    /// 依數量正負判斷方向
    pub fn direction(&self) -> MovementDirection {
        if self.quantity < 0.0 {
            MovementDirection::Outbound
        } else {
            MovementDirection::Inbound
        }
    }

    /// 檢查是否為消耗
    pub fn is_consumption(&self) -> bool {
        self.direction() == MovementDirection::Outbound
    }

    /// 消耗數量（入庫為 0）
    pub fn consumed_qty(&self) -> f64 {
        if self.is_consumption() && self.quantity.is_finite() {
            -self.quantity
        } else {
            0.0
        }
    }
}
