use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Mode;

/// Every state change of the timer produces an Event.
/// The CLI prints them as JSON lines; embedders can react to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum Event {
    TimerStarted {
        mode: Mode,
        seconds_left: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: Mode,
        seconds_left: u64,
        at: DateTime<Utc>,
    },
    ModeSwitched {
        mode: Mode,
        seconds_left: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    /// A phase ran out and the timer moved to the next one.
    PhaseCompleted {
        from: Mode,
        to: Mode,
        /// Task credited with the pomodoro (work phases only).
        task_id: Option<String>,
        /// The credited task's count after this pomodoro.
        done_poms: Option<u32>,
        /// The credited task reached its estimate on this pomodoro.
        task_completed: bool,
        at: DateTime<Utc>,
    },
    StreakUpdated {
        current: u32,
        best: u32,
        at: DateTime<Utc>,
    },
}
