// src/transfer/command.rs

use std::fmt;

/// Program used for every transfer.
pub const SCP_PROGRAM: &str = "scp";

/// One scp invocation for a single changed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferCommand {
    pub source_path: String,
    /// `host:path`
    pub destination_spec: String,
    pub port: u16,
}

impl TransferCommand {
    pub fn new(
        source_path: impl Into<String>,
        remote_host: &str,
        remote_destination: &str,
        port: u16,
    ) -> Self {
        Self {
            source_path: source_path.into(),
            destination_spec: format!("{remote_host}:{remote_destination}"),
            port,
        }
    }

    /// Arguments passed to scp, without the program name.
    ///
    /// The paths are separate argv entries and never go through a shell.
    pub fn args(&self) -> Vec<String> {
        vec![
            "-P".to_string(),
            self.port.to_string(),
            "-rp".to_string(),
            self.source_path.clone(),
            self.destination_spec.clone(),
        ]
    }
}

/// Renders the command line for logs: `scp -P <port> -rp <src> <dest>`.
impl fmt::Display for TransferCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SCP_PROGRAM}")?;
        for arg in self.args() {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
