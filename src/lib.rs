//! # Restock
//!
//! 庫存補貨建議、庫存分析與商機管道的統一入口
//!
//! 各計算模組皆為純函數：輸入物料、異動與配置，返回完整結果。
//! 以 [`RoleMap`] 為參數的函數會先檢查使用者在對應區域的權限。

pub use restock_cache::{
    has_newer_logs, latest_upload, Dataset, DirtyTracker, SnapshotCache, UploadLog,
};
pub use restock_calc::{
    BrandRollup, ConsumptionCalculator, CoverageCalculator, DistributionCalculator,
    InventorySeries, LineShare, ReplenishmentCalculator, ReplenishmentResult, RestockWarning,
    SeriesCalculator, SeriesQuery, WarningSeverity,
};
pub use restock_core::{
    AppArea, BrandSummaryRow, CatalogIndex, Item, MovementDirection, MovementRecord, Period,
    ReplenishmentConfig, ReplenishmentRow, RestockError, Role, RoleMap, UNBRANDED,
};
pub use restock_crm::{
    ActivityMetrics, ActivitySnapshot, MetricsCalculator, Opportunity, OpportunitySnapshot,
    PipelineMetrics, Placement, StageBoard, StageKey,
};

use chrono::NaiveDate;
use restock_core::Result;
use uuid::Uuid;

/// 計算補貨建議（需要庫存區一般權限）
pub fn replenishment_for(
    roles: &RoleMap,
    items: &[Item],
    movements: &[MovementRecord],
    config: ReplenishmentConfig,
) -> Result<ReplenishmentResult> {
    roles.require(AppArea::Inventory, Role::Standard)?;
    ReplenishmentCalculator::new(config).calculate(items, movements)
}

/// 建立庫存趨勢序列（需要庫存區一般權限）
pub fn inventory_series_for(
    roles: &RoleMap,
    items: &[Item],
    movements: &[MovementRecord],
    query: &SeriesQuery,
) -> Result<Option<InventorySeries>> {
    roles.require(AppArea::Inventory, Role::Standard)?;
    SeriesCalculator::build(movements, &CatalogIndex::build(items), query)
}

/// 商機管道指標（需要 CRM 一般權限）
pub fn pipeline_for(
    roles: &RoleMap,
    opportunities: &[OpportunitySnapshot],
) -> Result<PipelineMetrics> {
    roles.require(AppArea::Crm, Role::Standard)?;
    Ok(MetricsCalculator::pipeline(opportunities))
}

/// 最近數週活動指標（需要 CRM 一般權限）
pub fn activities_for(
    roles: &RoleMap,
    activities: &[ActivitySnapshot],
    today: NaiveDate,
) -> Result<ActivityMetrics> {
    roles.require(AppArea::Crm, Role::Standard)?;
    Ok(MetricsCalculator::activities(activities, today))
}

/// 拖放商機卡片（需要 CRM 一般權限）
pub fn move_opportunity(
    roles: &RoleMap,
    board: &mut StageBoard,
    card_id: Uuid,
    target: &StageKey,
    index: usize,
) -> Result<Placement> {
    roles.require(AppArea::Crm, Role::Standard)?;
    board.move_card(card_id, target, index)
}
