// src/config/mod.rs

//! Configuration loading and validation.
//!
//! - `model.rs`: the TOML-backed data model and the validated `SyncProfile`.
//! - `loader.rs`: reading a config file from disk.
//! - `validate.rs`: field checks and glob compilation.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load, load_and_validate, load_from_path, load_from_str};
pub use model::{
    ConfigFile, ProfileConfig, RawConfigFile, SyncProfile, DEFAULT_INCLUDE_PATTERNS,
    DEFAULT_REMOTE_PORT,
};
