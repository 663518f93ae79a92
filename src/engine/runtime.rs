// src/engine/runtime.rs

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use crate::transfer::TransferBackend;
use crate::types::ChangeEvent;

use super::dispatcher::{DispatchOutcome, Dispatcher};

/// Per-profile counters, reported when the loop ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub transferred: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl DispatchStats {
    fn record(&mut self, outcome: &DispatchOutcome) {
        match outcome {
            DispatchOutcome::Transferred(_) => self.transferred += 1,
            DispatchOutcome::Failed(_) => self.failed += 1,
            DispatchOutcome::Skipped | DispatchOutcome::Rejected => self.skipped += 1,
        }
    }
}

/// Main event loop for one profile.
///
/// - Events are handled one at a time, in delivery order.
/// - A transfer in progress is always awaited; `stop` is only observed
///   between events.
/// - Ends on `stop` or when the event channel closes.
pub async fn run_dispatch_loop(
    dispatcher: Dispatcher,
    mut events: mpsc::UnboundedReceiver<ChangeEvent>,
    backend: Arc<dyn TransferBackend>,
    mut stop: oneshot::Receiver<()>,
) -> DispatchStats {
    let name = dispatcher.profile().name.clone();
    let mut stats = DispatchStats::default();

    info!(profile = %name, root = ?dispatcher.root(), "dispatcher started");

    loop {
        tokio::select! {
            biased;

            _ = &mut stop => {
                debug!(profile = %name, "stop requested");
                break;
            }

            event = events.recv() => {
                let Some(event) = event else {
                    debug!(profile = %name, "event channel closed");
                    break;
                };
                let outcome = dispatcher.handle(&event, backend.as_ref()).await;
                stats.record(&outcome);
            }
        }
    }

    info!(
        profile = %name,
        transferred = stats.transferred,
        failed = stats.failed,
        skipped = stats.skipped,
        "dispatcher stopped"
    );
    stats
}
