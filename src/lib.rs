// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod logging;
pub mod transfer;
pub mod types;
pub mod watch;

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::CliArgs;
use crate::engine::{DispatchStats, Supervisor};
use crate::transfer::{ScpBackend, TransferBackend};
use crate::types::Platform;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - one watcher + dispatcher per profile
/// - Ctrl-C handling and orderly shutdown
pub async fn run(args: CliArgs) -> Result<()> {
    let backend: Arc<dyn TransferBackend> = Arc::new(ScpBackend::new());

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {e}");
            // Without a signal handler the only sane option is to keep running.
            std::future::pending::<()>().await;
        }
        info!("interrupt received; stopping watchers");
    };

    run_until(&args.config, backend, Platform::current(), shutdown).await?;
    Ok(())
}

/// Load `config_path`, start every profile, run until `shutdown` resolves,
/// then stop and join all watchers.
///
/// Only config errors are returned; per-profile and per-event failures are
/// logged.
pub async fn run_until<F>(
    config_path: &Path,
    backend: Arc<dyn TransferBackend>,
    platform: Platform,
    shutdown: F,
) -> Result<Vec<(String, DispatchStats)>>
where
    F: Future<Output = ()>,
{
    let profiles = config::load(config_path)
        .with_context(|| format!("loading config {}", config_path.display()))?;

    let supervisor = Supervisor::start(profiles, backend, platform);
    info!(active = ?supervisor.active_profiles(), "syncwatch running");

    shutdown.await;

    Ok(supervisor.shutdown().await)
}
