//! Persistence for Define-XML editing sessions.
//!
//! The editor never writes the document history to disk. What is saved
//! periodically is a [`SessionSnapshot`]: a small projection of the editing
//! context (study identity, document fingerprint, history position, view
//! state, loaded terminology) that lets a session be resumed against the
//! document it was taken from.
//!
//! # Features
//!
//! - **Atomic writes** to prevent data corruption
//! - **Document fingerprints** via SHA-256 to detect a changed source
//! - **Auto-save** on an interval, with debounce and a final save on exit
//! - **Settings** in TOML under the platform config directory
//!
//! # File Format
//!
//! Session files are JSON objects whose `schema_version` field is checked
//! before the rest is parsed:
//!
//! ```text
//! {
//!   "schema_version": 1,
//!   "saved_at": "2026-10-19T09:30:00Z",
//!   "study_oid": "ST.CDISC01",
//!   "fingerprint": "9f2c...",
//!   ...
//! }
//! ```
//!
//! # Example
//!
//! ```ignore
//! use define_persistence::{AutoSaveConfig, AutosaveHandle, FileGateway, SessionSnapshot};
//!
//! let gateway = FileGateway::new("cdisc01.session.json");
//! let autosave = AutosaveHandle::spawn(gateway, AutoSaveConfig::default());
//!
//! ctx.dispatch(action)?;
//! autosave.publish(SessionSnapshot::project(&ctx)?);
//!
//! // On confirmed exit:
//! autosave.shutdown().await?;
//! ```
//!
//! # Architecture
//!
//! - `snapshot.rs` - Session snapshot projection
//! - `gateway.rs` - Snapshot sinks
//! - `io/` - File I/O (atomic save, load, fingerprint, document source)
//! - `autosave/` - Auto-save config, dirty tracking and background worker
//! - `settings.rs` - Editor settings
//! - `error.rs` - Error types with user-friendly messages

mod autosave;
mod error;
mod gateway;
mod io;
mod settings;
mod snapshot;

pub use autosave::{AutoSaveConfig, AutosaveHandle, AutosaveStats, DirtyTracker};
pub use error::{PersistenceError, Result};
pub use gateway::{FileGateway, SnapshotSink};
pub use io::{
    document_fingerprint, fingerprint_bytes, load_snapshot, load_snapshot_async, read_document,
    save_snapshot, write_document,
};
pub use settings::{EditorSettings, HistorySettings, IntegritySettings};
pub use snapshot::{CURRENT_SCHEMA_VERSION, HistoryPosition, SessionSnapshot, TerminologyRef};
