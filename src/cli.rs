// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments for `syncwatch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "syncwatch",
    version,
    about = "Watch local directories and scp changed files to remote hosts.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML), one table per sync profile.
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
