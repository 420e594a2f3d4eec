//! Read-only statistics over the pomodoro log.
//!
//! Everything here is a pure function of the log and "today"; nothing is
//! cached or stored.

use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::session_log::{count_on, LogEntry};
use crate::streak::Streak;

/// Length of the trend series.
pub const SERIES_DAYS: u64 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub value: usize,
}

/// Everything the stats view shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub today_count: usize,
    pub total_count: usize,
    pub series: Vec<DailyCount>,
    pub goal_per_day: u32,
    /// Today's progress toward the goal, 0..=100.
    pub goal_percent: u32,
    pub current_streak: u32,
    pub best_streak: u32,
}

impl Dashboard {
    pub fn build(log: &[LogEntry], streak: &Streak, goal_per_day: u32, today: NaiveDate) -> Self {
        let today_count = today_count(log, today);
        Self {
            today_count,
            total_count: total_count(log),
            series: series_for_7_days(log, today),
            goal_per_day,
            goal_percent: goal_percent(today_count, goal_per_day),
            current_streak: streak.current,
            best_streak: streak.best,
        }
    }
}

pub fn today_count(log: &[LogEntry], today: NaiveDate) -> usize {
    count_on(log, today)
}

/// Every entry is one completed work phase, whatever its length.
pub fn total_count(log: &[LogEntry]) -> usize {
    log.len()
}

/// Per-day counts for the seven days ending on `today`, oldest first.
pub fn series_for_7_days(log: &[LogEntry], today: NaiveDate) -> Vec<DailyCount> {
    let mut per_day: HashMap<NaiveDate, usize> = HashMap::new();
    for entry in log {
        *per_day.entry(entry.date).or_default() += 1;
    }

    (0..SERIES_DAYS)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .map(|date| DailyCount {
            date,
            value: per_day.get(&date).copied().unwrap_or(0),
        })
        .collect()
}

pub fn goal_percent(today_count: usize, goal_per_day: u32) -> u32 {
    let goal = goal_per_day.max(1) as f64;
    let pct = (today_count as f64 / goal * 100.0).round();
    pct.min(100.0) as u32
}
