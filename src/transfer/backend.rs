// src/transfer/backend.rs

//! Pluggable transfer backend.
//!
//! Dispatchers talk to a `TransferBackend` instead of spawning processes
//! directly, so tests can swap in a recording fake while production uses
//! [`ScpBackend`].

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, warn};

use crate::errors::Result;

use super::command::{SCP_PROGRAM, TransferCommand};

/// Outcome of one transfer process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOutcome {
    Success,
    /// Non-zero exit; `-1` if the process was killed by a signal.
    Failed(i32),
}

/// Runs transfer commands to completion.
///
/// `Err` means the transfer could not be run at all (e.g. scp missing);
/// a transfer that ran and failed is `Ok(TransferOutcome::Failed(_))`.
pub trait TransferBackend: Send + Sync {
    fn transfer<'a>(
        &'a self,
        command: &'a TransferCommand,
    ) -> Pin<Box<dyn Future<Output = Result<TransferOutcome>> + Send + 'a>>;
}

/// Production backend: runs `scp` with a structured argument list.
#[derive(Debug, Clone)]
pub struct ScpBackend {
    program: String,
}

impl ScpBackend {
    pub fn new() -> Self {
        Self {
            program: SCP_PROGRAM.to_string(),
        }
    }

    /// Use a different executable with the same argument convention.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for ScpBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl TransferBackend for ScpBackend {
    fn transfer<'a>(
        &'a self,
        command: &'a TransferCommand,
    ) -> Pin<Box<dyn Future<Output = Result<TransferOutcome>> + Send + 'a>> {
        Box::pin(async move {
            let mut cmd = Command::new(&self.program);
            cmd.args(command.args())
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::piped());

            let mut child = cmd
                .spawn()
                .with_context(|| format!("spawning `{command}`"))?;

            // Drain stderr so scp can't block on a full pipe; keep it at debug.
            if let Some(stderr) = child.stderr.take() {
                let dest = command.destination_spec.clone();
                tokio::spawn(async move {
                    let mut lines = BufReader::new(stderr).lines();
                    while let Ok(Some(line)) = lines.next_line().await {
                        debug!(dest = %dest, "scp stderr: {}", line);
                    }
                });
            }

            let status = child
                .wait()
                .await
                .with_context(|| format!("waiting for `{command}`"))?;

            if status.success() {
                Ok(TransferOutcome::Success)
            } else {
                let code = status.code().unwrap_or(-1);
                if status.code().is_none() {
                    warn!(cmd = %command, "transfer process terminated by signal");
                }
                Ok(TransferOutcome::Failed(code))
            }
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn command() -> TransferCommand {
        TransferCommand::new("/tmp/a.py", "u@h", "/r/a.py", 22)
    }

    #[tokio::test]
    async fn maps_exit_status() {
        let ok = ScpBackend::with_program("true");
        let bad = ScpBackend::with_program("false");

        assert_eq!(ok.transfer(&command()).await.unwrap(), TransferOutcome::Success);
        assert_eq!(bad.transfer(&command()).await.unwrap(), TransferOutcome::Failed(1));
    }

    #[tokio::test]
    async fn missing_program_is_an_error() {
        let backend = ScpBackend::with_program("/nonexistent/syncwatch-scp");
        assert!(backend.transfer(&command()).await.is_err());
    }
}
