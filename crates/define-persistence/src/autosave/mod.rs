//! Auto-save functionality for sessions.
//!
//! Provides:
//! - `AutoSaveConfig` - User settings for auto-save behavior
//! - `DirtyTracker` - Tracks unsaved changes with debounce
//! - `AutosaveHandle` - Background worker saving published snapshots

mod config;
mod tracker;
mod worker;

pub use config::AutoSaveConfig;
pub use tracker::DirtyTracker;
pub use worker::{AutosaveHandle, AutosaveStats};
