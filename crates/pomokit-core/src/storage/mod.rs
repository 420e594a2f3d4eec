//! Document persistence.
//!
//! The app keeps four whole documents (settings, tasks, log, streak). A
//! [`Store`] only moves raw JSON strings; [`StoreExt`] layers typed
//! `load`/`save` on top so the timer and bookkeeping code never see the
//! storage medium.

mod config;
mod memory;
mod sqlite;

pub use config::{AppConfig, CueConfig, NotificationsConfig};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use std::fmt;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ConfigError, StoreError};

/// The documents the app persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocKey {
    Settings,
    Tasks,
    Log,
    Streak,
}

impl DocKey {
    pub const ALL: [DocKey; 4] = [DocKey::Settings, DocKey::Tasks, DocKey::Log, DocKey::Streak];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocKey::Settings => "settings",
            DocKey::Tasks => "tasks",
            DocKey::Log => "log",
            DocKey::Streak => "streak",
        }
    }
}

impl fmt::Display for DocKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whole-document key-value storage. Writes replace the full document.
pub trait Store {
    fn read(&self, key: DocKey) -> Result<Option<String>, StoreError>;

    fn write(&mut self, key: DocKey, json: &str) -> Result<(), StoreError>;

    /// Remove every document.
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// Typed access on top of any [`Store`].
pub trait StoreExt: Store {
    /// Read and decode a document. Missing, unreadable or corrupt documents
    /// yield `default`.
    fn load<T: DeserializeOwned>(&self, key: DocKey, default: T) -> T {
        match self.read(key) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!(%key, error = %e, "stored document is corrupt, using default");
                    default
                }
            },
            Ok(None) => default,
            Err(e) => {
                tracing::warn!(%key, error = %e, "failed to read document, using default");
                default
            }
        }
    }

    fn save<T: Serialize + ?Sized>(&mut self, key: DocKey, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string(value).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.write(key, &json)
    }
}

impl<S: Store + ?Sized> StoreExt for S {}

/// Returns the pomokit data directory, creating it if needed.
///
/// `POMOKIT_DATA_DIR` wins if set. Otherwise `~/.config/pomokit`, or
/// `~/.config/pomokit-dev` when `POMOKIT_ENV=dev`.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("POMOKIT_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("POMOKIT_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("pomokit-dev")
            } else {
                base_dir.join("pomokit")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
