// src/watch/watcher.rs

use std::sync::Arc;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::SyncProfile;
use crate::engine::dispatcher::Dispatcher;
use crate::engine::runtime::{DispatchStats, run_dispatch_loop};
use crate::errors::{Result, SyncError};
use crate::transfer::TransferBackend;
use crate::types::{ChangeEvent, Platform};
use crate::watch::event::adapt;

/// One profile's live watch subscription and its dispatch loop.
///
/// Dropping the handle drops the `notify` watcher, which ends the
/// subscription; [`WatchHandle::stop`] + [`WatchHandle::join`] is the orderly
/// path.
pub struct WatchHandle {
    profile: String,
    watcher: Option<RecommendedWatcher>,
    stop_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<DispatchStats>,
}

impl std::fmt::Debug for WatchHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchHandle")
            .field("profile", &self.profile)
            .field("stopped", &self.watcher.is_none())
            .finish()
    }
}

impl WatchHandle {
    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// Unsubscribe and ask the dispatch loop to exit after its current event.
    pub fn stop(&mut self) {
        if self.watcher.take().is_some() {
            debug!(profile = %self.profile, "watch subscription dropped");
        }
        if let Some(tx) = self.stop_tx.take() {
            // Err only means the loop has already finished.
            let _ = tx.send(());
        }
    }

    /// Wait for the dispatch loop to finish. Calls [`stop`](Self::stop) first
    /// if it hasn't been.
    pub async fn join(mut self) -> DispatchStats {
        self.stop();
        match self.task.await {
            Ok(stats) => stats,
            Err(err) => {
                warn!(profile = %self.profile, error = %err, "dispatch loop did not finish cleanly");
                DispatchStats::default()
            }
        }
    }
}

/// Start watching `profile.local_path` recursively and dispatch its changes.
///
/// Fails with [`SyncError::WatchSetup`] if the root is missing, not a
/// directory, or cannot be subscribed to.
pub fn spawn_profile_watch(
    profile: Arc<SyncProfile>,
    backend: Arc<dyn TransferBackend>,
    platform: Platform,
) -> Result<WatchHandle> {
    let name = profile.name.clone();
    let local = &profile.local_path;

    if !local.is_dir() {
        let reason = if local.exists() {
            "is not a directory"
        } else {
            "does not exist"
        };
        return Err(SyncError::watch_setup(
            &name,
            format!("{} {reason}", local.display()),
        ));
    }

    // Canonicalize once so event paths and the root share a prefix. `dunce`
    // keeps Windows roots in `C:\` form rather than `\\?\C:\`.
    let root = dunce::canonicalize(local)
        .map_err(|e| SyncError::watch_setup(&name, format!("{}: {e}", local.display())))?;

    let dispatcher = Dispatcher::new(Arc::clone(&profile), platform)
        .map_err(|e| SyncError::watch_setup(&name, e.to_string()))?
        .with_root(&root);

    // Channel from the blocking notify callback into the async world.
    let (event_tx, event_rx) = mpsc::unbounded_channel::<ChangeEvent>();

    let mut watcher = RecommendedWatcher::new(
        {
            let name = name.clone();
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    for change in adapt(&event) {
                        if event_tx.send(change).is_err() {
                            // Receiver gone: the profile is shutting down.
                            return;
                        }
                    }
                }
                Err(err) => {
                    warn!(profile = %name, error = %err, "file watch error");
                }
            }
        },
        Config::default(),
    )
    .map_err(|e| SyncError::watch_setup(&name, e.to_string()))?;

    watcher
        .watch(&root, RecursiveMode::Recursive)
        .map_err(|e| SyncError::watch_setup(&name, e.to_string()))?;

    info!(profile = %name, root = ?root, "file watcher started");

    let (stop_tx, stop_rx) = oneshot::channel();
    let task = tokio::spawn(run_dispatch_loop(dispatcher, event_rx, backend, stop_rx));

    Ok(WatchHandle {
        profile: name,
        watcher: Some(watcher),
        stop_tx: Some(stop_tx),
        task,
    })
}
