use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use syncwatch::errors::Result;
use syncwatch::transfer::{TransferBackend, TransferCommand, TransferOutcome};

/// A fake transfer backend that:
/// - records every command it is asked to run
/// - answers with scripted outcomes, then `Success` once the script is empty.
#[derive(Clone, Default)]
pub struct RecordingBackend {
    executed: Arc<Mutex<Vec<TransferCommand>>>,
    script: Arc<Mutex<VecDeque<TransferOutcome>>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue outcomes for the next transfers, in order.
    pub fn with_outcomes(outcomes: impl IntoIterator<Item = TransferOutcome>) -> Self {
        let backend = Self::new();
        backend.script.lock().unwrap().extend(outcomes);
        backend
    }

    pub fn executed(&self) -> Vec<TransferCommand> {
        self.executed.lock().unwrap().clone()
    }

    /// Rendered command lines, handy for assertions.
    pub fn command_lines(&self) -> Vec<String> {
        self.executed().iter().map(|c| c.to_string()).collect()
    }
}

impl TransferBackend for RecordingBackend {
    fn transfer<'a>(
        &'a self,
        command: &'a TransferCommand,
    ) -> Pin<Box<dyn Future<Output = Result<TransferOutcome>> + Send + 'a>> {
        let executed = Arc::clone(&self.executed);
        let script = Arc::clone(&self.script);

        Box::pin(async move {
            executed.lock().unwrap().push(command.clone());
            let outcome = script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(TransferOutcome::Success);
            Ok(outcome)
        })
    }
}
