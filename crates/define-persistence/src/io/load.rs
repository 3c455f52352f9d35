//! Snapshot loading operations.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{PersistenceError, Result};
use crate::snapshot::{CURRENT_SCHEMA_VERSION, SessionSnapshot};

/// Just enough of a session file to check its version.
#[derive(Deserialize)]
struct Header {
    schema_version: u32,
}

/// Load a session snapshot.
pub fn load_snapshot(path: &Path) -> Result<SessionSnapshot> {
    let bytes = fs::read(path).map_err(|e| PersistenceError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_snapshot_bytes(&bytes, path)
}

/// Load a snapshot on the blocking thread pool.
pub async fn load_snapshot_async(path: PathBuf) -> Result<SessionSnapshot> {
    tokio::task::spawn_blocking(move || load_snapshot(&path))
        .await
        .map_err(|e| PersistenceError::TaskFailed {
            operation: "load",
            source: e,
        })?
}

fn parse_snapshot_bytes(bytes: &[u8], path: &Path) -> Result<SessionSnapshot> {
    let header: Header =
        serde_json::from_slice(bytes).map_err(|e| PersistenceError::InvalidFormat {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    if header.schema_version > CURRENT_SCHEMA_VERSION {
        return Err(PersistenceError::UnsupportedVersion {
            found: header.schema_version,
            max_supported: CURRENT_SCHEMA_VERSION,
            path: path.to_path_buf(),
        });
    }

    let snapshot: SessionSnapshot =
        serde_json::from_slice(bytes).map_err(|e| PersistenceError::Deserialization {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    tracing::info!(path = %path.display(), study = %snapshot.study_name, "loaded session snapshot");
    Ok(snapshot)
}
