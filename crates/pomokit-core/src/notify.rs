//! Best-effort notification and sound seams.
//!
//! Delivery is never guaranteed. Callers log failures and move on; a phase
//! transition never waits on or fails because of these.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

#[derive(Error, Debug)]
#[error("{0}")]
pub struct NotifyError(pub String);

pub trait Notifier {
    fn notify(&self, title: &str, body: &str) -> Result<(), NotifyError>;
}

pub trait SoundCue {
    fn play(&self, frequency_hz: u32, duration_ms: u32) -> Result<(), NotifyError>;
}

/// Drops every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _title: &str, _body: &str) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// Plays nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSound;

impl SoundCue for NullSound {
    fn play(&self, _frequency_hz: u32, _duration_ms: u32) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// Emits notifications as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, title: &str, body: &str) -> Result<(), NotifyError> {
        tracing::info!(target: "pomokit::notify", %title, %body, "notification");
        Ok(())
    }
}

/// One captured notification or sound cue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cue {
    Notification { title: String, body: String },
    Sound { frequency_hz: u32, duration_ms: u32 },
}

/// Records every cue it receives; clones share the record. Useful for
/// embedders that want to render cues themselves, and for tests.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    cues: Rc<RefCell<Vec<Cue>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cues(&self) -> Vec<Cue> {
        self.cues.borrow().clone()
    }

    pub fn clear(&self) {
        self.cues.borrow_mut().clear();
    }
}

impl Notifier for Recorder {
    fn notify(&self, title: &str, body: &str) -> Result<(), NotifyError> {
        self.cues.borrow_mut().push(Cue::Notification {
            title: title.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

impl SoundCue for Recorder {
    fn play(&self, frequency_hz: u32, duration_ms: u32) -> Result<(), NotifyError> {
        self.cues.borrow_mut().push(Cue::Sound {
            frequency_hz,
            duration_ms,
        });
        Ok(())
    }
}

/// Always fails. Lets tests check that a broken notifier cannot stall the
/// timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingNotifier;

impl Notifier for FailingNotifier {
    fn notify(&self, _title: &str, _body: &str) -> Result<(), NotifyError> {
        Err(NotifyError("notification permission denied".into()))
    }
}

impl SoundCue for FailingNotifier {
    fn play(&self, _frequency_hz: u32, _duration_ms: u32) -> Result<(), NotifyError> {
        Err(NotifyError("no audio device".into()))
    }
}
