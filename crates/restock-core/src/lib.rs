//! # Restock Core
//!
//! 補貨計算的核心資料模型與類型定義

pub mod access;
pub mod calendar;
pub mod config;
pub mod item;
pub mod movement;
pub mod row;

// Re-export 主要類型
pub use access::{AppArea, Role, RoleMap};
pub use calendar::{months_before, Period};
pub use config::ReplenishmentConfig;
pub use item::{CatalogIndex, Item};
pub use movement::{MovementDirection, MovementRecord};
pub use row::{BrandSummaryRow, ReplenishmentRow, UNBRANDED};

/// 補貨系統錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum RestockError {
    #[error("無效的配置: {0}")]
    InvalidConfiguration(String),

    #[error("目錄中找不到物料: {0}")]
    MissingCatalogEntry(String),

    #[error("無效的日期: {0}")]
    InvalidDate(String),

    #[error("看板上找不到卡片: {0}")]
    UnknownCard(String),

    #[error("權限不足：{area} 需要 {required}")]
    AccessDenied { area: AppArea, required: Role },

    #[error("計算錯誤: {0}")]
    CalculationError(String),
}

pub type Result<T> = std::result::Result<T, RestockError>;
