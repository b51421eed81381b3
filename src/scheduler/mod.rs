//! Scheduler module
//!
//! Runs the snapshot pipeline on a fixed interval (3 minutes by default) and
//! on demand, publishing each result to the snapshot store.

mod refresh;

pub use refresh::{RefreshHandle, RefreshScheduler};
