//! 日曆週期與月份運算

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{RestockError, Result};

/// 分析圖表的時間週期
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// 每日
    Day,
    /// 每週（週一開始）
    Week,
    /// 每月
    Month,
    /// 每年
    Year,
}

impl Period {
    /// 取得日期所屬週期的起始日
    pub fn bucket_start(self, date: NaiveDate) -> NaiveDate {
        match self {
            Period::Day => date,
            Period::Week => week_start(date),
            // 每月 1 日與 1 月 1 日對任何合法日期都存在
            Period::Month => date.with_day(1).unwrap_or(date),
            Period::Year => date.with_day(1).and_then(|d| d.with_month(1)).unwrap_or(date),
        }
    }

    /// 下一個週期的起始日
    pub fn next(self, start: NaiveDate) -> Result<NaiveDate> {
        let next = match self {
            Period::Day => start.checked_add_days(Days::new(1)),
            Period::Week => start.checked_add_days(Days::new(7)),
            Period::Month => start.checked_add_months(Months::new(1)),
            Period::Year => start.checked_add_months(Months::new(12)),
        };
        next.ok_or_else(|| RestockError::InvalidDate(format!("{} 之後的週期溢出", start)))
    }
}

/// 週一為一週的起始日
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_monday() as u64;
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// 往前推算 n 個日曆月（月底自動截斷，如 3/31 往前一個月為 2/28）
pub fn months_before(date: NaiveDate, months: u32) -> Result<NaiveDate> {
    date.checked_sub_months(Months::new(months))
        .ok_or_else(|| RestockError::InvalidDate(format!("{} 往前 {} 個月溢出", date, months)))
}
