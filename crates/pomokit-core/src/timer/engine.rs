//! Phase timer engine.
//!
//! A countdown state machine over three phases. It has no thread and no
//! clock of its own: the host calls [`TimerEngine::tick`] once per elapsed
//! second while the timer runs, and acts on [`Tick::Expired`].
//!
//! ## State Transitions
//!
//! ```text
//! work --expire--> short | long --expire--> work
//! ```
//!
//! Manual mode switches and reset stop the clock and reload the phase's
//! configured duration.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(&settings);
//! engine.start();
//! // once per second:
//! if let Tick::Expired { mode } = engine.tick() {
//!     let next = next_mode(mode, done_poms, settings.long_every());
//!     engine.enter(next, &settings);
//! }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::mode::Mode;
use crate::events::Event;
use crate::settings::Settings;

/// In-memory timer state. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub mode: Mode,
    pub seconds_left: u64,
    pub running: bool,
    #[serde(default)]
    pub active_task_id: Option<String>,
}

/// Outcome of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Timer is paused; nothing happened.
    Idle,
    Counting { seconds_left: u64 },
    /// The phase ran out. The clock is already stopped.
    Expired { mode: Mode },
}

#[derive(Debug, Clone)]
pub struct TimerEngine {
    state: TimerState,
}

impl TimerEngine {
    /// Paused at the start of a work phase, no task bound.
    pub fn new(settings: &Settings) -> Self {
        Self {
            state: TimerState {
                mode: Mode::Work,
                seconds_left: settings.phase_secs(Mode::Work),
                running: false,
                active_task_id: None,
            },
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn seconds_left(&self) -> u64 {
        self.state.seconds_left
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn active_task_id(&self) -> Option<&str> {
        self.state.active_task_id.as_deref()
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if self.state.running {
            return None;
        }
        self.state.running = true;
        Some(Event::TimerStarted {
            mode: self.state.mode,
            seconds_left: self.state.seconds_left,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.state.running {
            return None;
        }
        self.state.running = false;
        Some(Event::TimerPaused {
            mode: self.state.mode,
            seconds_left: self.state.seconds_left,
            at: Utc::now(),
        })
    }

    pub fn toggle(&mut self) -> Option<Event> {
        if self.state.running {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Stop the clock and load `mode` with its full duration.
    pub fn switch_mode(&mut self, mode: Mode, settings: &Settings) -> Event {
        self.enter(mode, settings);
        Event::ModeSwitched {
            mode,
            seconds_left: self.state.seconds_left,
            at: Utc::now(),
        }
    }

    pub fn reset(&mut self, settings: &Settings) -> Event {
        self.enter(Mode::Work, settings);
        Event::TimerReset { at: Utc::now() }
    }

    pub fn bind(&mut self, task_id: Option<String>) {
        self.state.active_task_id = task_id;
    }

    /// Reload the countdown if the current phase's duration changed.
    pub fn apply_settings(&mut self, previous: &Settings, settings: &Settings) {
        let mode = self.state.mode;
        if previous.phase_secs(mode) != settings.phase_secs(mode) {
            self.state.seconds_left = settings.phase_secs(mode);
        }
    }

    /// Advance one second.
    pub fn tick(&mut self) -> Tick {
        if !self.state.running {
            return Tick::Idle;
        }
        self.state.seconds_left = self.state.seconds_left.saturating_sub(1);
        if self.state.seconds_left == 0 {
            self.state.running = false;
            return Tick::Expired {
                mode: self.state.mode,
            };
        }
        Tick::Counting {
            seconds_left: self.state.seconds_left,
        }
    }

    /// Load `mode` with its configured duration, clock stopped.
    pub fn enter(&mut self, mode: Mode, settings: &Settings) {
        self.state.running = false;
        self.state.mode = mode;
        self.state.seconds_left = settings.phase_secs(mode);
    }
}

/// Phase that follows `from`.
///
/// After work the choice depends on the credited task's pomodoro count
/// (after this pomodoro). Unbound sessions count as 1, so they only earn a
/// long break when `long_every` is 1.
pub fn next_mode(from: Mode, done_poms_after: Option<u32>, long_every: u32) -> Mode {
    match from {
        Mode::Work => {
            let count = done_poms_after.unwrap_or(1);
            if count % long_every.max(1) == 0 {
                Mode::Long
            } else {
                Mode::Short
            }
        }
        Mode::Short | Mode::Long => Mode::Work,
    }
}

/// `mm:ss`, minutes not capped at 59.
pub fn format_mmss(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick() -> Settings {
        Settings {
            work_min: 1,
            short_min: 1,
            long_min: 2,
            ..Settings::default()
        }
    }

    #[test]
    fn start_pause_keeps_remaining() {
        let settings = quick();
        let mut engine = TimerEngine::new(&settings);
        assert!(!engine.is_running());
        assert!(engine.start().is_some());
        assert!(engine.start().is_none());
        engine.tick();
        engine.tick();
        assert!(engine.pause().is_some());
        assert!(engine.pause().is_none());
        assert_eq!(engine.seconds_left(), 58);
        assert_eq!(engine.tick(), Tick::Idle);
        assert_eq!(engine.seconds_left(), 58);
    }

    #[test]
    fn counts_down_to_expiry() {
        let settings = quick();
        let mut engine = TimerEngine::new(&settings);
        engine.start();
        for _ in 0..59 {
            assert!(matches!(engine.tick(), Tick::Counting { .. }));
        }
        assert_eq!(engine.tick(), Tick::Expired { mode: Mode::Work });
        assert!(!engine.is_running());
        assert_eq!(engine.seconds_left(), 0);
    }

    #[test]
    fn switch_mode_stops_and_reloads() {
        let settings = quick();
        let mut engine = TimerEngine::new(&settings);
        engine.start();
        engine.tick();
        engine.switch_mode(Mode::Long, &settings);
        assert!(!engine.is_running());
        assert_eq!(engine.mode(), Mode::Long);
        assert_eq!(engine.seconds_left(), 120);
    }

    #[test]
    fn reset_returns_to_work() {
        let settings = quick();
        let mut engine = TimerEngine::new(&settings);
        engine.switch_mode(Mode::Short, &settings);
        engine.start();
        engine.reset(&settings);
        assert_eq!(engine.mode(), Mode::Work);
        assert_eq!(engine.seconds_left(), 60);
        assert!(!engine.is_running());
    }

    #[test]
    fn reset_keeps_bound_task() {
        let settings = quick();
        let mut engine = TimerEngine::new(&settings);
        engine.bind(Some("t1".into()));
        engine.reset(&settings);
        assert_eq!(engine.active_task_id(), Some("t1"));
    }

    #[test]
    fn settings_change_rederives_current_phase_only() {
        let before = quick();
        let mut engine = TimerEngine::new(&before);
        engine.start();
        engine.tick();

        let shorter_break = Settings {
            short_min: 3,
            ..before.clone()
        };
        engine.apply_settings(&before, &shorter_break);
        assert_eq!(engine.seconds_left(), 59);

        let longer_work = Settings {
            work_min: 10,
            ..shorter_break.clone()
        };
        engine.apply_settings(&shorter_break, &longer_work);
        assert_eq!(engine.seconds_left(), 600);
    }

    #[test]
    fn next_mode_follows_task_count() {
        for count in 1..=12 {
            let expected = if count % 4 == 0 { Mode::Long } else { Mode::Short };
            assert_eq!(next_mode(Mode::Work, Some(count), 4), expected, "count {count}");
        }
        assert_eq!(next_mode(Mode::Short, Some(4), 4), Mode::Work);
        assert_eq!(next_mode(Mode::Long, None, 4), Mode::Work);
    }

    #[test]
    fn unbound_work_counts_as_one() {
        assert_eq!(next_mode(Mode::Work, None, 4), Mode::Short);
        assert_eq!(next_mode(Mode::Work, None, 1), Mode::Long);
        assert_eq!(next_mode(Mode::Work, None, 0), Mode::Long);
    }

    #[test]
    fn mmss_formatting() {
        assert_eq!(format_mmss(0), "00:00");
        assert_eq!(format_mmss(65), "01:05");
        assert_eq!(format_mmss(25 * 60), "25:00");
        assert_eq!(format_mmss(180 * 60), "180:00");
    }
}
