// src/engine/supervisor.rs

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::config::SyncProfile;
use crate::transfer::TransferBackend;
use crate::types::Platform;
use crate::watch::watcher::{WatchHandle, spawn_profile_watch};

use super::runtime::DispatchStats;

/// Owns one watch handle per running profile.
///
/// A profile that fails to start is logged and skipped; it never keeps the
/// others from starting.
pub struct Supervisor {
    handles: Vec<WatchHandle>,
    failed: Vec<String>,
}

impl std::fmt::Debug for Supervisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Supervisor")
            .field("active", &self.active_profiles())
            .field("failed", &self.failed)
            .finish()
    }
}

impl Supervisor {
    /// Start a watcher + dispatcher for every profile.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(
        profiles: impl IntoIterator<Item = (String, SyncProfile)>,
        backend: Arc<dyn TransferBackend>,
        platform: Platform,
    ) -> Self {
        let mut handles = Vec::new();
        let mut failed = Vec::new();

        for (name, profile) in profiles {
            info!(profile = %name, path = ?profile.local_path, "creating watcher");

            match spawn_profile_watch(Arc::new(profile), Arc::clone(&backend), platform) {
                Ok(handle) => handles.push(handle),
                Err(err) => {
                    error!(profile = %name, error = %err, "profile not started");
                    failed.push(name);
                }
            }
        }

        if handles.is_empty() {
            warn!("no profile is being watched");
        }

        Self { handles, failed }
    }

    /// Names of the profiles that started, in config order.
    pub fn active_profiles(&self) -> Vec<&str> {
        self.handles.iter().map(|h| h.profile()).collect()
    }

    /// Names of the profiles that failed to start.
    pub fn failed_profiles(&self) -> &[String] {
        &self.failed
    }

    /// Stop every watcher, then wait for every dispatcher to finish.
    pub async fn shutdown(mut self) -> Vec<(String, DispatchStats)> {
        for handle in self.handles.iter_mut() {
            handle.stop();
        }

        let mut results = Vec::with_capacity(self.handles.len());
        for handle in self.handles {
            let name = handle.profile().to_string();
            let stats = handle.join().await;
            results.push((name, stats));
        }

        info!(profiles = results.len(), "all watchers stopped");
        results
    }
}
