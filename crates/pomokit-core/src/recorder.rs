//! Session recorder: bookkeeping for a finished work phase.

use chrono::NaiveDate;
use serde::Serialize;

use crate::session_log::LogEntry;
use crate::task::Task;

/// Progress of the bound task after a pomodoro was credited to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskProgress {
    pub task_id: String,
    pub done_poms: u32,
    pub completed: bool,
    /// The task crossed its estimate on this pomodoro.
    pub newly_completed: bool,
}

/// What [`record_completion`] changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordedSession {
    pub entry: LogEntry,
    pub task: Option<TaskProgress>,
}

/// Credit a finished work phase.
///
/// If `active_task_id` names a task in `tasks`, that task's counter goes up
/// and it is marked completed once it reaches its estimate. An id that no
/// longer resolves is treated as unbound. Either way one entry is appended
/// to `log`.
pub fn record_completion(
    tasks: &mut [Task],
    log: &mut Vec<LogEntry>,
    active_task_id: Option<&str>,
    category_fallback: &str,
    duration_secs: u64,
    date: NaiveDate,
) -> RecordedSession {
    let bound = active_task_id.and_then(|id| tasks.iter_mut().find(|t| t.id == id));

    let (category, progress) = match bound {
        Some(task) => {
            let newly_completed = task.credit_pomodoro();
            let progress = TaskProgress {
                task_id: task.id.clone(),
                done_poms: task.done_poms,
                completed: task.completed,
                newly_completed,
            };
            (task.category.clone(), Some(progress))
        }
        None => (category_fallback.to_string(), None),
    };

    let entry = LogEntry::new(
        date,
        duration_secs,
        &category,
        progress.as_ref().map(|p| p.task_id.as_str()),
    );
    log.push(entry.clone());

    RecordedSession {
        entry,
        task: progress,
    }
}
