//! Tasks the timer can be bound to.
//!
//! The `tasks` document is a plain `Vec<Task>`, newest first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Category used when neither the user nor a bound task supplies one.
pub const DEFAULT_CATEGORY: &str = "General";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub category: String,
    /// Target pomodoro count, at least 1.
    #[serde(default = "default_est")]
    pub est: u32,
    #[serde(default)]
    pub done_poms: u32,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

fn default_est() -> u32 {
    1
}

impl Task {
    /// Build a new task. The title is trimmed and must not be empty; an
    /// empty category falls back to `fallback_category`.
    pub fn new(
        title: &str,
        category: &str,
        fallback_category: &str,
        est: u32,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let category = match category.trim() {
            "" => fallback_category.to_string(),
            c => c.to_string(),
        };
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            category,
            est: est.max(1),
            done_poms: 0,
            completed: false,
            created_at,
        })
    }

    /// Credit one finished pomodoro. Returns true if this call completed the
    /// task. A task that is already completed stays completed.
    pub fn credit_pomodoro(&mut self) -> bool {
        self.done_poms = self.done_poms.saturating_add(1);
        let was_completed = self.completed;
        self.completed = was_completed || self.done_poms >= self.est;
        self.completed && !was_completed
    }

    /// `done/est`, as shown next to the task.
    pub fn progress_label(&self) -> String {
        format!("{}/{}", self.done_poms, self.est)
    }
}

pub fn find<'a>(tasks: &'a [Task], id: &str) -> Option<&'a Task> {
    tasks.iter().find(|t| t.id == id)
}

/// Flip a task's `completed` flag by hand. Returns the new value.
pub fn toggle(tasks: &mut [Task], id: &str) -> Result<bool, ValidationError> {
    let task = tasks
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(|| ValidationError::UnknownTask(id.to_string()))?;
    task.completed = !task.completed;
    Ok(task.completed)
}

pub fn remove(tasks: &mut Vec<Task>, id: &str) -> Result<Task, ValidationError> {
    let index = tasks
        .iter()
        .position(|t| t.id == id)
        .ok_or_else(|| ValidationError::UnknownTask(id.to_string()))?;
    Ok(tasks.remove(index))
}
