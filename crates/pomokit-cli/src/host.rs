//! Terminal implementations of the core's host collaborators.

use std::io::Write;

use pomokit_core::{Notifier, NotifyError, SoundCue};

/// Prints notifications on stderr so stdout stays machine-readable.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, title: &str, body: &str) -> Result<(), NotifyError> {
        let mut err = std::io::stderr().lock();
        writeln!(err, "\n[{title}] {body}").map_err(|e| NotifyError(e.to_string()))
    }
}

/// Rings the terminal bell. Terminals cannot pick a pitch, so the
/// frequency and length are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalBell;

impl SoundCue for TerminalBell {
    fn play(&self, _frequency_hz: u32, _duration_ms: u32) -> Result<(), NotifyError> {
        let mut err = std::io::stderr().lock();
        err.write_all(b"\x07")
            .and_then(|()| err.flush())
            .map_err(|e| NotifyError(e.to_string()))
    }
}
