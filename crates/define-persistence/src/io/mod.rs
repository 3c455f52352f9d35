//! File I/O operations for session persistence.
//!
//! This module handles:
//! - Saving snapshots with atomic writes
//! - Loading snapshots with version validation
//! - Document fingerprints for change detection
//! - Reading and writing define documents as JSON

mod document;
mod hash;
mod load;
mod save;

pub use document::{read_document, write_document};
pub use hash::{document_fingerprint, fingerprint_bytes};
pub use load::{load_snapshot, load_snapshot_async};
pub use save::save_snapshot;
pub(crate) use save::write_atomic;
