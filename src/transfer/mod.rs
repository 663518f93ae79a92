// src/transfer/mod.rs

//! Remote copy layer.
//!
//! - [`platform`] translates local paths into scp source paths.
//! - [`command`] is the scp invocation derived from one change event.
//! - [`backend`] runs commands; [`ScpBackend`] is the real one.

pub mod backend;
pub mod command;
pub mod platform;

pub use backend::{ScpBackend, TransferBackend, TransferOutcome};
pub use command::TransferCommand;
pub use platform::to_remote_source_path;
