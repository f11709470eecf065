//! # Restock CRM
//!
//! 商機看板排序與儀表板指標

pub mod board;
pub mod metrics;

// Re-export 主要類型
pub use board::{
    key_between, BoardCard, Column, Opportunity, Placement, StageBoard, StageKey,
};
pub use metrics::{
    is_closed_stage, ActivityMetrics, ActivitySnapshot, MetricsCalculator, OpportunitySnapshot,
    PipelineMetrics, StageSummary, WeeklyActivity,
};
