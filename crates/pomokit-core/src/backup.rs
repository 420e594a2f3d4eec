//! Backup export and import.
//!
//! A backup is one JSON object `{settings, tasks, log}`. Import validates
//! every present document before writing any of them, so a bad file never
//! leaves the store half-replaced. The streak is not part of a backup.

use serde::Serialize;

use crate::error::{BackupError, StoreError};
use crate::session_log::LogEntry;
use crate::settings::Settings;
use crate::storage::{DocKey, Store, StoreExt};
use crate::task::Task;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Backup<'a> {
    pub settings: &'a Settings,
    pub tasks: &'a [Task],
    pub log: &'a [LogEntry],
}

impl Backup<'_> {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Documents found in a backup file, already validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedBackup {
    pub settings: Option<Settings>,
    pub tasks: Option<Vec<Task>>,
    pub log: Option<Vec<LogEntry>>,
}

/// Which documents an import replaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub settings: bool,
    pub tasks: Option<usize>,
    pub log: Option<usize>,
}

impl ImportSummary {
    pub fn is_empty(&self) -> bool {
        !self.settings && self.tasks.is_none() && self.log.is_none()
    }
}

/// Parse and validate a backup without touching any store. A key that is
/// absent or `null` is left out.
pub fn parse(json: &str) -> Result<ParsedBackup, BackupError> {
    let root: serde_json::Value = serde_json::from_str(json).map_err(BackupError::Malformed)?;
    let obj = root.as_object().ok_or(BackupError::NotAnObject)?;

    Ok(ParsedBackup {
        settings: document(obj, DocKey::Settings)?,
        tasks: document(obj, DocKey::Tasks)?,
        log: document(obj, DocKey::Log)?,
    })
}

fn document<T: serde::de::DeserializeOwned>(
    obj: &serde_json::Map<String, serde_json::Value>,
    key: DocKey,
) -> Result<Option<T>, BackupError> {
    match obj.get(key.as_str()) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|source| BackupError::InvalidDocument {
                key: key.to_string(),
                source,
            }),
    }
}

/// Write the validated documents. Absent documents stay as they are.
pub fn write<S: Store + ?Sized>(
    store: &mut S,
    backup: &ParsedBackup,
) -> Result<ImportSummary, StoreError> {
    let mut summary = ImportSummary::default();
    if let Some(settings) = &backup.settings {
        store.save(DocKey::Settings, settings)?;
        summary.settings = true;
    }
    if let Some(tasks) = &backup.tasks {
        store.save(DocKey::Tasks, tasks)?;
        summary.tasks = Some(tasks.len());
    }
    if let Some(log) = &backup.log {
        store.save(DocKey::Log, log)?;
        summary.log = Some(log.len());
    }
    Ok(summary)
}
