//! # pomokit core library
//!
//! Business logic for the pomokit Pomodoro timer: one phase timer, a task
//! list credited with finished pomodoros, a day streak and a small stats
//! dashboard. The `pomokit` CLI is a thin host over this crate.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a countdown state machine over work / short break /
//!   long break that the host ticks once per second
//! - **Session Recorder**: credits the bound task and appends to the log
//!   when a work phase ends
//! - **Streak Tracker**: consecutive-day streak, re-evaluated after every
//!   log append
//! - **Statistics**: pure projections of the log
//! - **Storage**: whole-document key-value persistence behind the [`Store`]
//!   trait, with SQLite and in-memory backends, plus TOML app config
//!
//! ## Key Components
//!
//! - [`PomodoroApp`]: ties everything together
//! - [`TimerEngine`]: core timer state machine
//! - [`Store`] / [`StoreExt`]: persistence seam
//! - [`Notifier`] / [`SoundCue`]: best-effort host collaborators

pub mod app;
pub mod backup;
pub mod clock;
pub mod error;
pub mod events;
pub mod notify;
pub mod recorder;
pub mod session_log;
pub mod settings;
pub mod stats;
pub mod storage;
pub mod streak;
pub mod task;
pub mod timer;

pub use app::{PomodoroApp, Status};
pub use backup::ImportSummary;
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{BackupError, ConfigError, CoreError, StoreError, ValidationError};
pub use events::Event;
pub use notify::{Notifier, NotifyError, SoundCue};
pub use recorder::{record_completion, RecordedSession, TaskProgress};
pub use session_log::LogEntry;
pub use settings::{SettingField, Settings};
pub use stats::{DailyCount, Dashboard};
pub use storage::{AppConfig, DocKey, MemoryStore, SqliteStore, Store, StoreExt};
pub use streak::Streak;
pub use task::Task;
pub use timer::{Mode, TimerEngine, TimerState};
