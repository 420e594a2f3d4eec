pub mod backup;
pub mod config;
pub mod data;
pub mod settings;
pub mod stats;
pub mod task;
pub mod timer;

use pomokit_core::{AppConfig, PomodoroApp, SqliteStore, SystemClock};
use serde::Serialize;

use crate::host::{TerminalBell, TerminalNotifier};

pub type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Open the app on the default on-disk store.
pub fn open_app(config: &AppConfig) -> CliResult<PomodoroApp<SqliteStore>> {
    let store = SqliteStore::open_default()?;
    Ok(PomodoroApp::new(store, SystemClock)
        .with_config(config.clone())
        .with_notifier(TerminalNotifier)
        .with_sound(TerminalBell))
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
