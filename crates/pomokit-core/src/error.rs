//! Core error types for pomokit-core.
//!
//! One top-level [`CoreError`] wraps a small error enum per concern, all built
//! with thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pomokit-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Persistent store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Backup import/export errors
    #[error("Backup error: {0}")]
    Backup(#[from] BackupError),

    /// Application config errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persistent store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the backing database
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked by another process
    #[error("Store is locked")]
    Locked,

    /// A document could not be serialized before writing
    #[error("Failed to encode document '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Backup import errors. Any of these means nothing was written.
#[derive(Error, Debug)]
pub enum BackupError {
    /// The file is not valid JSON
    #[error("Backup is not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    /// The root value is not a JSON object
    #[error("Backup root must be a JSON object")]
    NotAnObject,

    /// A document is present but has the wrong shape
    #[error("Backup document '{key}' has an invalid shape: {source}")]
    InvalidDocument {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Application config errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not exist in the config tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Data directory could not be determined or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Task title is empty after trimming
    #[error("Task title must not be empty")]
    EmptyTitle,

    /// No task with this id
    #[error("Unknown task: {0}")]
    UnknownTask(String),

    /// No settings field with this name
    #[error("Unknown setting: {0}")]
    UnknownSetting(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(code, _msg)
                if code.code == rusqlite::ErrorCode::DatabaseLocked =>
            {
                StoreError::Locked
            }
            _ => StoreError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
