// src/config/model.rs

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Deserialize;

/// Patterns used when a profile does not set `patterns`.
pub const DEFAULT_INCLUDE_PATTERNS: &[&str] = &["*.py", "*.sh", "*.yaml", "*.capnp", "*.go"];

/// Port used when `remote_server_cs_port` is omitted.
pub const DEFAULT_REMOTE_PORT: u16 = 22;

/// Raw document as read from TOML: profile name -> profile table.
///
/// ```toml
/// [web]
/// path = "/srv/app"
/// remote_path = "/backup/app"
/// remote_server_cs = "deploy@host1"
/// remote_server_cs_port = 2222
/// ```
///
/// An `IndexMap` keeps profiles in document order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct RawConfigFile {
    pub profiles: IndexMap<String, ProfileConfig>,
}

/// One `[<name>]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileConfig {
    /// Local directory to watch.
    pub path: String,

    /// Root directory on the remote host.
    pub remote_path: String,

    /// Connection string handed to scp, e.g. `user@host`.
    pub remote_server_cs: String,

    /// `i64` so that out-of-range values reach validation instead of failing
    /// deep inside serde with a less useful message.
    #[serde(default = "default_remote_port")]
    pub remote_server_cs_port: i64,

    /// Include globs. `None` means [`DEFAULT_INCLUDE_PATTERNS`].
    #[serde(default)]
    pub patterns: Option<Vec<String>>,

    #[serde(default)]
    pub ignore_patterns: Option<Vec<String>>,

    /// If true, directory events are dispatched like file events.
    #[serde(default)]
    pub include_directories: bool,

    #[serde(default)]
    pub case_sensitive: bool,
}

fn default_remote_port() -> i64 {
    i64::from(DEFAULT_REMOTE_PORT)
}

impl ProfileConfig {
    /// Effective include patterns, falling back to the defaults.
    pub fn effective_patterns(&self) -> Vec<String> {
        match &self.patterns {
            Some(list) => list.clone(),
            None => DEFAULT_INCLUDE_PATTERNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// A validated sync profile. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncProfile {
    pub name: String,
    pub local_path: PathBuf,
    pub remote_path: String,
    pub remote_host: String,
    pub remote_port: u16,
    pub include_patterns: Vec<String>,
    pub ignore_patterns: Option<Vec<String>>,
    pub include_directories: bool,
    pub case_sensitive: bool,
}

impl SyncProfile {
    /// Build a profile with default patterns and port.
    pub fn new(
        name: impl Into<String>,
        local_path: impl Into<PathBuf>,
        remote_path: impl Into<String>,
        remote_host: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            local_path: local_path.into(),
            remote_path: remote_path.into(),
            remote_host: remote_host.into(),
            remote_port: DEFAULT_REMOTE_PORT,
            include_patterns: DEFAULT_INCLUDE_PATTERNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ignore_patterns: None,
            include_directories: false,
            case_sensitive: false,
        }
    }
}

/// Validated configuration: profiles in document order.
///
/// Only constructible through `TryFrom<RawConfigFile>` (see `validate.rs`).
#[derive(Debug, Clone)]
pub struct ConfigFile {
    profiles: Vec<SyncProfile>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(profiles: Vec<SyncProfile>) -> Self {
        Self { profiles }
    }

    pub fn profiles(&self) -> &[SyncProfile] {
        &self.profiles
    }

    /// `(name, profile)` pairs in document order.
    pub fn into_named(self) -> Vec<(String, SyncProfile)> {
        self.profiles
            .into_iter()
            .map(|p| (p.name.clone(), p))
            .collect()
    }
}
