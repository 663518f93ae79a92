// src/watch/mod.rs

//! File watching and change filtering.
//!
//! - compiling include/ignore globs per profile (`patterns`);
//! - adapting `notify` events into [`ChangeEvent`](crate::types::ChangeEvent)s
//!   (`event`);
//! - one recursive `notify` watcher per profile (`watcher`).
//!
//! It does not know about scp; matched events are handed to the engine.

pub mod event;
pub mod path_utils;
pub mod patterns;
pub mod watcher;

pub use patterns::ProfileMatcher;
pub use watcher::{WatchHandle, spawn_profile_watch};
