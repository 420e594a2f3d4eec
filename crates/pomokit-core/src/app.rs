//! Application facade.
//!
//! [`PomodoroApp`] owns the four documents, the timer and the host
//! collaborators, and runs the phase-completion flow:
//!
//! ```text
//! tick -> expired work phase -> record (tasks + log) -> save
//!      -> streak recompute -> save -> sound/notification -> next phase
//! ```
//!
//! Every mutation is written through to the store immediately, one whole
//! document at a time.

use serde::Serialize;

use crate::backup::{self, Backup, ImportSummary};
use crate::clock::Clock;
use crate::error::{Result, StoreError, ValidationError};
use crate::events::Event;
use crate::notify::{LogNotifier, Notifier, NullSound, SoundCue};
use crate::recorder::{self, RecordedSession};
use crate::session_log::LogEntry;
use crate::settings::{SettingField, Settings};
use crate::stats::Dashboard;
use crate::storage::{AppConfig, DocKey, Store, StoreExt};
use crate::streak::Streak;
use crate::task::{self, Task};
use crate::timer::{next_mode, Mode, Tick, TimerEngine, TimerState};

/// Snapshot for status displays.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Status<'a> {
    pub timer: &'a TimerState,
    pub display: String,
    pub active_task: Option<&'a Task>,
    pub today_count: usize,
    pub goal_per_day: u32,
    pub streak: &'a Streak,
}

pub struct PomodoroApp<S: Store> {
    store: S,
    settings: Settings,
    tasks: Vec<Task>,
    log: Vec<LogEntry>,
    streak: Streak,
    timer: TimerEngine,
    config: AppConfig,
    clock: Box<dyn Clock>,
    notifier: Box<dyn Notifier>,
    sound: Box<dyn SoundCue>,
}

impl<S: Store> PomodoroApp<S> {
    /// Load every document from `store` (defaults for anything missing or
    /// corrupt) and bring the streak up to date for today.
    pub fn new(store: S, clock: impl Clock + 'static) -> Self {
        let settings: Settings = store.load(DocKey::Settings, Settings::default());
        let timer = TimerEngine::new(&settings);
        let mut app = Self {
            tasks: store.load(DocKey::Tasks, Vec::new()),
            log: store.load(DocKey::Log, Vec::new()),
            streak: store.load(DocKey::Streak, Streak::default()),
            settings,
            timer,
            store,
            config: AppConfig::default(),
            clock: Box::new(clock),
            notifier: Box::new(LogNotifier),
            sound: Box::new(NullSound),
        };
        if let Err(e) = app.refresh_streak() {
            tracing::warn!(error = %e, "could not save refreshed streak");
        }
        app
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn with_sound(mut self, sound: impl SoundCue + 'static) -> Self {
        self.sound = Box::new(sound);
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    pub fn streak(&self) -> &Streak {
        &self.streak
    }

    pub fn timer(&self) -> &TimerState {
        self.timer.state()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// The bound task, if it still exists.
    pub fn active_task(&self) -> Option<&Task> {
        self.timer
            .active_task_id()
            .and_then(|id| task::find(&self.tasks, id))
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard::build(
            &self.log,
            &self.streak,
            self.settings.goal_per_day,
            self.clock.today(),
        )
    }

    pub fn status(&self) -> Status<'_> {
        Status {
            timer: self.timer.state(),
            display: crate::timer::format_mmss(self.timer.seconds_left()),
            active_task: self.active_task(),
            today_count: crate::stats::today_count(&self.log, self.clock.today()),
            goal_per_day: self.settings.goal_per_day,
            streak: &self.streak,
        }
    }

    // ── Timer ────────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        self.timer.start()
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.timer.pause()
    }

    pub fn toggle(&mut self) -> Option<Event> {
        self.timer.toggle()
    }

    pub fn switch_mode(&mut self, mode: Mode) -> Event {
        self.timer.switch_mode(mode, &self.settings)
    }

    pub fn reset(&mut self) -> Event {
        self.timer.reset(&self.settings)
    }

    /// Bind the timer to a task, or unbind with `None`.
    pub fn bind_task(&mut self, task_id: Option<&str>) -> Result<()> {
        if let Some(id) = task_id {
            if task::find(&self.tasks, id).is_none() {
                return Err(ValidationError::UnknownTask(id.to_string()).into());
            }
        }
        self.timer.bind(task_id.map(str::to_string));
        Ok(())
    }

    /// Advance the clock by one second and run the phase transition if the
    /// phase ran out.
    ///
    /// The transition always completes in memory. A failed write is
    /// reported after the fact.
    pub fn tick(&mut self) -> Result<Vec<Event>> {
        match self.timer.tick() {
            Tick::Expired { mode } => self.complete_phase(mode),
            Tick::Idle | Tick::Counting { .. } => Ok(Vec::new()),
        }
    }

    fn complete_phase(&mut self, finished: Mode) -> Result<Vec<Event>> {
        let mut events = Vec::new();
        let mut saved: Result<(), StoreError> = Ok(());
        let mut recorded: Option<RecordedSession> = None;

        if finished == Mode::Work {
            let today = self.clock.today();
            let session = recorder::record_completion(
                &mut self.tasks,
                &mut self.log,
                self.timer.active_task_id(),
                &self.config.default_category,
                self.settings.phase_secs(Mode::Work),
                today,
            );
            saved = self
                .persist(DocKey::Tasks)
                .and_then(|()| self.persist(DocKey::Log));
            recorded = Some(session);
        }

        let progress = recorded.as_ref().and_then(|r| r.task.as_ref());
        let next = next_mode(
            finished,
            progress.map(|p| p.done_poms),
            self.settings.long_every(),
        );
        tracing::info!(from = %finished, to = %next, task = ?progress.map(|p| &p.task_id), "phase completed");
        events.push(Event::PhaseCompleted {
            from: finished,
            to: next,
            task_id: progress.map(|p| p.task_id.clone()),
            done_poms: progress.map(|p| p.done_poms),
            task_completed: progress.is_some_and(|p| p.newly_completed),
            at: self.clock.now(),
        });

        if recorded.is_some() {
            let today = self.clock.today();
            if self.streak.recompute(&self.log, today) {
                saved = saved.and_then(|()| self.persist(DocKey::Streak));
                events.push(Event::StreakUpdated {
                    current: self.streak.current,
                    best: self.streak.best,
                    at: self.clock.now(),
                });
            }
        }

        self.announce(finished);
        self.timer.enter(next, &self.settings);
        if self.settings.auto_next {
            events.extend(self.timer.start());
        }

        saved?;
        Ok(events)
    }

    /// Sound and notification for a finished phase. Failures are logged and
    /// dropped.
    fn announce(&self, finished: Mode) {
        let (title, body, hz) = match finished {
            Mode::Work => (
                "Pomodoro complete",
                "Take a breath and start your break.",
                self.config.cue.work_done_hz,
            ),
            Mode::Short | Mode::Long => (
                "Break over",
                "Recharged. Back to focus!",
                self.config.cue.break_done_hz,
            ),
        };
        if self.settings.sound {
            if let Err(e) = self.sound.play(hz, self.config.cue.duration_ms) {
                tracing::debug!(error = %e, "sound cue failed");
            }
        }
        if self.config.notifications.enabled {
            if let Err(e) = self.notifier.notify(title, body) {
                tracing::debug!(error = %e, "notification failed");
            }
        }
    }

    // ── Tasks ────────────────────────────────────────────────────────

    /// Add a task at the top of the list and bind the timer to it.
    pub fn add_task(&mut self, title: &str, category: Option<&str>, est: u32) -> Result<&Task> {
        let task = Task::new(
            title,
            category.unwrap_or_default(),
            &self.config.default_category,
            est,
            self.clock.now(),
        )?;
        self.timer.bind(Some(task.id.clone()));
        self.tasks.insert(0, task);
        self.persist(DocKey::Tasks)?;
        Ok(&self.tasks[0])
    }

    pub fn toggle_task(&mut self, id: &str) -> Result<bool> {
        let completed = task::toggle(&mut self.tasks, id)?;
        self.persist(DocKey::Tasks)?;
        Ok(completed)
    }

    /// Delete a task. Unbinds it if it was bound; log entries keep its id.
    pub fn delete_task(&mut self, id: &str) -> Result<Task> {
        let removed = task::remove(&mut self.tasks, id)?;
        if self.timer.active_task_id() == Some(id) {
            self.timer.bind(None);
        }
        self.persist(DocKey::Tasks)?;
        Ok(removed)
    }

    // ── Settings ─────────────────────────────────────────────────────

    /// Edit one setting from raw input. Returns the stored value.
    pub fn edit_setting(&mut self, field: SettingField, raw: &str) -> Result<String> {
        let previous = self.settings.clone();
        let applied = self.settings.edit(field, raw);
        self.timer.apply_settings(&previous, &self.settings);
        self.persist(DocKey::Settings)?;
        Ok(applied)
    }

    pub fn reset_settings(&mut self) -> Result<()> {
        let previous = std::mem::take(&mut self.settings);
        self.timer.apply_settings(&previous, &self.settings);
        self.persist(DocKey::Settings)?;
        Ok(())
    }

    // ── Backup ───────────────────────────────────────────────────────

    pub fn export_backup(&self) -> Result<String> {
        let backup = Backup {
            settings: &self.settings,
            tasks: &self.tasks,
            log: &self.log,
        };
        Ok(backup.to_json()?)
    }

    /// Replace the documents present in `json`. Nothing is written unless
    /// every present document is valid. On success the app reloads from the
    /// store and the timer starts fresh.
    pub fn import_backup(&mut self, json: &str) -> Result<ImportSummary> {
        let parsed = backup::parse(json)?;
        let summary = backup::write(&mut self.store, &parsed)?;
        tracing::info!(?summary, "backup imported");
        self.reload()?;
        Ok(summary)
    }

    /// Wipe every stored document and start over with defaults.
    pub fn clear_all(&mut self) -> Result<()> {
        self.store.clear()?;
        tracing::info!("all data cleared");
        self.reload()
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn reload(&mut self) -> Result<()> {
        self.settings = self.store.load(DocKey::Settings, Settings::default());
        self.tasks = self.store.load(DocKey::Tasks, Vec::new());
        self.log = self.store.load(DocKey::Log, Vec::new());
        self.streak = self.store.load(DocKey::Streak, Streak::default());
        self.timer = TimerEngine::new(&self.settings);
        self.refresh_streak()?;
        Ok(())
    }

    fn refresh_streak(&mut self) -> Result<(), StoreError> {
        if self.streak.recompute(&self.log, self.clock.today()) {
            self.persist(DocKey::Streak)?;
        }
        Ok(())
    }

    fn persist(&mut self, key: DocKey) -> Result<(), StoreError> {
        match key {
            DocKey::Settings => self.store.save(key, &self.settings),
            DocKey::Tasks => self.store.save(key, &self.tasks),
            DocKey::Log => self.store.save(key, &self.log),
            DocKey::Streak => self.store.save(key, &self.streak),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::notify::{Cue, FailingNotifier, Recorder};
    use crate::storage::MemoryStore;
    use chrono::NaiveDate;

    fn clock() -> FixedClock {
        FixedClock::new(NaiveDate::from_ymd_opt(2024, 4, 15).unwrap())
    }

    fn quick_app() -> PomodoroApp<MemoryStore> {
        let mut app = PomodoroApp::new(MemoryStore::new(), clock());
        app.edit_setting(SettingField::WorkMin, "1").unwrap();
        app.edit_setting(SettingField::ShortMin, "1").unwrap();
        app.edit_setting(SettingField::LongMin, "1").unwrap();
        app
    }

    fn run_out(app: &mut PomodoroApp<MemoryStore>) -> Vec<Event> {
        app.start();
        let mut events = Vec::new();
        for _ in 0..app.timer().seconds_left {
            events.extend(app.tick().unwrap());
        }
        events
    }

    #[test]
    fn work_expiry_credits_task_and_moves_to_break() {
        let mut app = quick_app();
        let id = app.add_task("Essay", Some("Study"), 2).unwrap().id.clone();

        let events = run_out(&mut app);

        assert_eq!(app.tasks()[0].done_poms, 1);
        assert_eq!(app.log().len(), 1);
        assert_eq!(app.log()[0].seconds, 60);
        assert_eq!(app.log()[0].task_id.as_deref(), Some(id.as_str()));
        assert_eq!(app.timer().mode, Mode::Short);
        assert!(app.timer().running, "autoNext starts the break");
        assert!(matches!(
            events[0],
            Event::PhaseCompleted { from: Mode::Work, to: Mode::Short, done_poms: Some(1), .. }
        ));
        assert!(matches!(events.last(), Some(Event::TimerStarted { mode: Mode::Short, .. })));
    }

    #[test]
    fn break_expiry_returns_to_work_without_logging() {
        let mut app = quick_app();
        app.switch_mode(Mode::Long);
        run_out(&mut app);
        assert_eq!(app.timer().mode, Mode::Work);
        assert!(app.log().is_empty());
    }

    #[test]
    fn auto_next_off_leaves_timer_paused() {
        let mut app = quick_app();
        app.edit_setting(SettingField::AutoNext, "false").unwrap();
        run_out(&mut app);
        assert!(!app.timer().running);
        assert_eq!(app.timer().seconds_left, 60);
    }

    #[test]
    fn cues_follow_sound_setting() {
        let recorder = Recorder::new();
        let mut app = quick_app()
            .with_notifier(recorder.clone())
            .with_sound(recorder.clone());
        run_out(&mut app);
        assert_eq!(
            recorder.cues(),
            vec![
                Cue::Sound { frequency_hz: 880, duration_ms: 280 },
                Cue::Notification {
                    title: "Pomodoro complete".into(),
                    body: "Take a breath and start your break.".into(),
                },
            ]
        );

        recorder.clear();
        app.edit_setting(SettingField::Sound, "off").unwrap();
        run_out(&mut app);
        assert!(recorder
            .cues()
            .iter()
            .all(|c| matches!(c, Cue::Notification { .. })));
    }

    #[test]
    fn failing_collaborators_do_not_block_transition() {
        let mut app = quick_app()
            .with_notifier(FailingNotifier)
            .with_sound(FailingNotifier);
        run_out(&mut app);
        assert_eq!(app.timer().mode, Mode::Short);
        assert_eq!(app.log().len(), 1);
    }

    #[test]
    fn first_pomodoro_of_day_updates_streak() {
        let mut app = quick_app();
        let events = run_out(&mut app);
        assert_eq!(app.streak().current, 1);
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::StreakUpdated { current: 1, best: 1, .. })));

        app.reset();
        let events = run_out(&mut app);
        assert!(!events.iter().any(|e| matches!(e, Event::StreakUpdated { .. })));
    }

    #[test]
    fn bind_rejects_unknown_task() {
        let mut app = quick_app();
        assert!(app.bind_task(Some("nope")).is_err());
        assert!(app.bind_task(None).is_ok());
    }

    #[test]
    fn delete_unbinds_active_task() {
        let mut app = quick_app();
        let id = app.add_task("Stretch", None, 1).unwrap().id.clone();
        assert_eq!(app.timer().active_task_id.as_deref(), Some(id.as_str()));
        app.delete_task(&id).unwrap();
        assert!(app.timer().active_task_id.is_none());
        assert!(app.active_task().is_none());
    }

    #[test]
    fn edits_are_written_through() {
        let mut app = quick_app();
        app.add_task("Read", Some("Study"), 3).unwrap();
        let store = app.into_store();
        let tasks: Vec<Task> = store.load(DocKey::Tasks, Vec::new());
        let settings: Settings = store.load(DocKey::Settings, Settings::default());
        assert_eq!(tasks.len(), 1);
        assert_eq!(settings.work_min, 1);
    }

    #[test]
    fn editing_current_phase_duration_reloads_countdown() {
        let mut app = quick_app();
        app.start();
        app.tick().unwrap();
        assert_eq!(app.timer().seconds_left, 59);
        app.edit_setting(SettingField::WorkMin, "2").unwrap();
        assert_eq!(app.timer().seconds_left, 120);
    }
}
