// src/engine/dispatcher.rs

//! Per-profile change filter and transfer dispatcher.
//!
//! [`Dispatcher::plan`] is pure: event in, optional command out. It holds all
//! the filtering and path semantics and is what the unit tests exercise.
//! [`Dispatcher::handle`] wraps it with the backend call and logging.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::config::SyncProfile;
use crate::errors::{Result, SyncError};
use crate::transfer::{TransferBackend, TransferCommand, TransferOutcome, to_remote_source_path};
use crate::types::{ChangeEvent, Platform};
use crate::watch::path_utils::{join_remote, relative_str};
use crate::watch::patterns::ProfileMatcher;

/// What the dispatcher did with one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Filtered out by the directory flag or the globs.
    Skipped,
    /// Not under the profile root, or not a UTF-8 path; logged and dropped.
    Rejected,
    Transferred(TransferCommand),
    /// The transfer ran and exited non-zero, or could not be started.
    Failed(TransferCommand),
}

#[derive(Debug, Clone)]
pub struct Dispatcher {
    profile: Arc<SyncProfile>,
    root: PathBuf,
    matcher: ProfileMatcher,
    platform: Platform,
}

impl Dispatcher {
    /// Bind a dispatcher to `profile`, rooted at its `local_path`.
    pub fn new(profile: Arc<SyncProfile>, platform: Platform) -> Result<Self> {
        let matcher = ProfileMatcher::from_profile(&profile)?;
        Ok(Self {
            root: profile.local_path.clone(),
            profile,
            matcher,
            platform,
        })
    }

    /// Use `root` (e.g. the canonicalized local path) for prefix stripping.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn profile(&self) -> &SyncProfile {
        &self.profile
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Decide whether `event` needs a transfer, and build it.
    ///
    /// `Ok(None)` means filtered. An event outside the root is an error: the
    /// watcher and the profile disagree about what is being watched. So is a
    /// relevant path that is not UTF-8, since scp would receive a different name.
    pub fn plan(&self, event: &ChangeEvent) -> Result<Option<TransferCommand>> {
        let rel = relative_str(&self.root, &event.path).ok_or_else(|| {
            SyncError::PathOutsideRoot {
                path: event.path.clone(),
                root: self.root.clone(),
            }
        })?;

        // The root itself never maps to a file on the remote side.
        if rel.is_empty() {
            return Ok(None);
        }

        if !self.matcher.accepts(&rel, event.is_directory) {
            return Ok(None);
        }

        let local = event.path.to_str().ok_or_else(|| SyncError::NonUtf8Path {
            path: event.path.clone(),
        })?;
        let source = to_remote_source_path(local, self.platform);
        let destination = join_remote(&self.profile.remote_path, &rel);

        Ok(Some(TransferCommand::new(
            source,
            &self.profile.remote_host,
            &destination,
            self.profile.remote_port,
        )))
    }

    /// Filter one event and, if relevant, run its transfer to completion.
    ///
    /// Failures are logged and reported in the outcome; they never propagate.
    pub async fn handle(
        &self,
        event: &ChangeEvent,
        backend: &dyn TransferBackend,
    ) -> DispatchOutcome {
        let name = &self.profile.name;
        debug!(profile = %name, kind = %event.kind, path = ?event.path, "event received");

        let command = match self.plan(event) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => {
                debug!(profile = %name, kind = %event.kind, path = ?event.path, "event filtered");
                return DispatchOutcome::Skipped;
            }
            Err(err) => {
                warn!(profile = %name, error = %err, "dropping event");
                return DispatchOutcome::Rejected;
            }
        };

        info!(
            profile = %name,
            kind = %event.kind,
            path = ?event.path,
            "change detected"
        );
        info!(profile = %name, cmd = %command, "executing transfer");

        match backend.transfer(&command).await {
            Ok(TransferOutcome::Success) => {
                info!(profile = %name, dest = %command.destination_spec, "transfer complete");
                DispatchOutcome::Transferred(command)
            }
            Ok(TransferOutcome::Failed(code)) => {
                let err = SyncError::Transfer {
                    command: command.to_string(),
                    code,
                };
                error!(profile = %name, exit_code = code, "{err}");
                DispatchOutcome::Failed(command)
            }
            Err(err) => {
                error!(
                    profile = %name,
                    cmd = %command,
                    error = %err,
                    "failed to run transfer command"
                );
                DispatchOutcome::Failed(command)
            }
        }
    }
}
