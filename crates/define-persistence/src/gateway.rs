//! Snapshot sinks.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::io::save_snapshot;
use crate::snapshot::SessionSnapshot;

/// Destination for session snapshots.
///
/// Called from a blocking thread by the autosave worker.
pub trait SnapshotSink: Send + Sync + 'static {
    fn save(&self, snapshot: &SessionSnapshot) -> Result<()>;
}

/// Writes each snapshot to a single JSON file, replacing the previous one.
#[derive(Debug, Clone)]
pub struct FileGateway {
    path: PathBuf,
}

impl FileGateway {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSink for FileGateway {
    fn save(&self, snapshot: &SessionSnapshot) -> Result<()> {
        save_snapshot(snapshot, &self.path)
    }
}
