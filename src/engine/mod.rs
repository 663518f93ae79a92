// src/engine/mod.rs

//! Change-to-transfer pipeline.
//!
//! - [`dispatcher`]: per-profile filtering and transfer planning.
//! - [`runtime`]: the async loop feeding events into one dispatcher.
//! - [`supervisor`]: one watch + dispatcher pair per profile, and shutdown.

pub mod dispatcher;
pub mod runtime;
pub mod supervisor;

pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use runtime::{DispatchStats, run_dispatch_loop};
pub use supervisor::Supervisor;
