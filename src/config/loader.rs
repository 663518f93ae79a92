// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile, SyncProfile};
use crate::errors::{Result, SyncError};

/// Read and deserialize the TOML document without semantic checks.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| SyncError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    load_from_str(&contents)
}

pub fn load_from_str(contents: &str) -> Result<RawConfigFile> {
    let config: RawConfigFile = toml::from_str(contents)?;
    Ok(config)
}

/// Load a config file and validate it.
///
/// - Reads TOML.
/// - Applies defaults (port 22, default include patterns).
/// - Rejects empty required fields, bad ports and invalid globs.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw)?;
    debug!(
        path = ?path.as_ref(),
        profiles = config.profiles().len(),
        "config loaded"
    );
    Ok(config)
}

/// Load the named profiles of a config file, in document order.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<(String, SyncProfile)>> {
    Ok(load_and_validate(path)?.into_named())
}
