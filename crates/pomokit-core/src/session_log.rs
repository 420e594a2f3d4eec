//! Append-only log of completed work phases.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One completed pomodoro. Never modified after it is appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: String,
    /// Local calendar day, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub seconds: u64,
    pub category: String,
    /// Task credited with the pomodoro. May point at a deleted task.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
}

impl LogEntry {
    pub fn new(date: NaiveDate, seconds: u64, category: &str, task_id: Option<&str>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            seconds,
            category: category.to_string(),
            task_id: task_id.map(str::to_string),
        }
    }
}

pub fn count_on(log: &[LogEntry], date: NaiveDate) -> usize {
    log.iter().filter(|e| e.date == date).count()
}
