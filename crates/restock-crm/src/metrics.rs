//! CRM 儀表板指標

use chrono::{DateTime, Days, NaiveDate, Utc};
use restock_core::calendar::week_start;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// 未指定階段的名稱
pub const NO_STAGE: &str = "Sin etapa";

/// 儀表板顯示的週數
pub const ACTIVITY_WEEKS: u64 = 12;

/// 儀表板列出的最近活動數
pub const RECENT_ACTIVITIES: usize = 6;

/// 商機（指標所需欄位）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpportunitySnapshot {
    pub stage: Option<String>,
    pub status: Option<String>,
    pub value: Option<f64>,
}

/// 活動（指標所需欄位）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivitySnapshot {
    pub due_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl ActivitySnapshot {
    /// 活動日期：到期日，其次建立日
    pub fn date(&self) -> Option<NaiveDate> {
        self.timestamp().map(|t| t.date_naive())
    }

    /// 活動時間：到期時間，其次建立時間
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.due_at.or(self.created_at)
    }
}

/// 單一階段彙總
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageSummary {
    pub stage: String,
    pub count: usize,
    pub value: f64,
}

/// 商機管道指標
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineMetrics {
    pub open_deals: usize,
    pub pipeline_value: f64,
    /// 依金額遞減排序
    pub stages: Vec<StageSummary>,
}

/// 每週活動數
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyActivity {
    /// 週一日期
    pub week: NaiveDate,
    pub count: usize,
}

/// 活動指標
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityMetrics {
    /// 由舊到新的 [`ACTIVITY_WEEKS`] 週
    pub weeks: Vec<WeeklyActivity>,
    /// 本週活動數
    pub activities_this_week: usize,
    /// 最近 [`RECENT_ACTIVITIES`] 筆活動
    pub recent: Vec<ActivitySnapshot>,
}

/// 檢查階段或狀態是否代表已結案（贏單或輸單）
pub fn is_closed_stage(value: &str) -> bool {
    let key = value.to_lowercase();
    key.contains("ganad")
        || key.contains("perdid")
        || key == "won"
        || key == "lost"
        || key == "closed"
}

/// 指標計算器
pub struct MetricsCalculator;

impl MetricsCalculator {
    /// 商機管道：未結案數量與金額，以及各階段彙總
    pub fn pipeline(opportunities: &[OpportunitySnapshot]) -> PipelineMetrics {
        let mut open_deals = 0;
        let mut pipeline_value = 0.0;
        let mut by_stage: HashMap<String, StageSummary> = HashMap::new();

        for opportunity in opportunities {
            let stage = match opportunity.stage.as_deref() {
                Some(stage) if !stage.is_empty() => stage,
                _ => NO_STAGE,
            };
            let status = opportunity
                .status
                .as_deref()
                .unwrap_or_default()
                .trim()
                .to_lowercase();
            let closed = if status.is_empty() {
                is_closed_stage(stage)
            } else {
                is_closed_stage(&status)
            };
            let value = opportunity.value.filter(|v| v.is_finite()).unwrap_or(0.0);

            if !closed {
                open_deals += 1;
                pipeline_value += value;
            }
            let entry = by_stage
                .entry(stage.to_string())
                .or_insert_with(|| StageSummary {
                    stage: stage.to_string(),
                    count: 0,
                    value: 0.0,
                });
            entry.count += 1;
            entry.value += value;
        }

        let mut stages: Vec<StageSummary> = by_stage.into_values().collect();
        stages.sort_by(|a, b| b.value.total_cmp(&a.value).then_with(|| a.stage.cmp(&b.stage)));

        PipelineMetrics {
            open_deals,
            pipeline_value,
            stages,
        }
    }

    /// 最近 [`ACTIVITY_WEEKS`] 週的活動數（週一開始）
    pub fn activities(activities: &[ActivitySnapshot], today: NaiveDate) -> ActivityMetrics {
        let mut per_week: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        for date in activities.iter().filter_map(ActivitySnapshot::date) {
            *per_week.entry(week_start(date)).or_insert(0) += 1;
        }

        let current = week_start(today);
        let weeks = (0..ACTIVITY_WEEKS)
            .rev()
            .filter_map(|i| current.checked_sub_days(Days::new(i * 7)))
            .map(|week| WeeklyActivity {
                week,
                count: per_week.get(&week).copied().unwrap_or(0),
            })
            .collect();

        ActivityMetrics {
            weeks,
            activities_this_week: per_week.get(&current).copied().unwrap_or(0),
            recent: Self::recent(activities, RECENT_ACTIVITIES)
                .into_iter()
                .cloned()
                .collect(),
        }
    }

    /// 最近的 `n` 筆活動，依時間遞減；沒有日期的排在最後
    pub fn recent(activities: &[ActivitySnapshot], n: usize) -> Vec<&ActivitySnapshot> {
        let mut sorted: Vec<&ActivitySnapshot> = activities.iter().collect();
        sorted.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
        sorted.truncate(n);
        sorted
    }
}
