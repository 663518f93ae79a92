// src/errors.rs

//! Crate-wide error type.
//!
//! Config errors are fatal and surface before any watcher starts. Everything
//! else is scoped to one profile or one event and only ever gets logged.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("could not read config file {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parsing error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("failed to watch profile '{profile}': {message}")]
    WatchSetup { profile: String, message: String },

    #[error("path {path:?} is not under watched root {root:?}")]
    PathOutsideRoot { path: PathBuf, root: PathBuf },

    #[error("transfer failed with exit code {code}: {command}")]
    Transfer { command: String, code: i32 },

    #[error("path {path:?} is not valid UTF-8")]
    NonUtf8Path { path: PathBuf },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SyncError {
    /// True for the errors that abort startup.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            SyncError::ConfigRead { .. } | SyncError::ConfigParse(_) | SyncError::Config(_)
        )
    }

    pub(crate) fn watch_setup(profile: &str, message: impl Into<String>) -> Self {
        SyncError::WatchSetup {
            profile: profile.to_string(),
            message: message.into(),
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, SyncError>;
