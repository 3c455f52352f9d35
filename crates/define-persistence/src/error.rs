//! Persistence error types.
//!
//! All persistence operations return structured errors that provide
//! user-friendly messages and optional remediation hints.

use std::path::PathBuf;
use thiserror::Error;

/// Persistence operation error.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a session snapshot.
    #[error("Invalid session file format")]
    InvalidFormat { path: PathBuf, reason: String },

    /// Unsupported schema version.
    #[error("Session file version {found} is not supported (maximum: {max_supported})")]
    UnsupportedVersion {
        found: u32,
        max_supported: u32,
        path: PathBuf,
    },

    /// The document no longer matches the session it is resumed with.
    #[error("Document has changed since the session was saved")]
    FingerprintMismatch { expected: String, actual: String },

    /// Serialization error.
    #[error("Failed to serialize {what}")]
    Serialization {
        what: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Deserialization error.
    #[error("Failed to parse {path}")]
    Deserialization {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Settings file exists but cannot be parsed.
    #[error("Invalid settings file: {path}")]
    Settings {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A blocking save or load task panicked or was cancelled.
    #[error("Background {operation} task failed")]
    TaskFailed {
        operation: &'static str,
        #[source]
        source: tokio::task::JoinError,
    },
}

impl PersistenceError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} the file at {}", operation, path.display())
            }
            Self::InvalidFormat { path, reason } => {
                format!(
                    "The file at {} is not a valid session file: {}",
                    path.display(),
                    reason
                )
            }
            Self::UnsupportedVersion {
                found,
                max_supported,
                ..
            } => {
                format!(
                    "This session was saved by a newer version of the editor \
                    (file version {found}, your version supports up to {max_supported})."
                )
            }
            Self::FingerprintMismatch { .. } => {
                "The define document was modified outside this session.".to_string()
            }
            Self::Serialization { what, .. } => {
                format!("An error occurred while writing the {what}.")
            }
            Self::Deserialization { path, .. } => {
                format!(
                    "The file at {} could not be read. It may be corrupted.",
                    path.display()
                )
            }
            Self::Settings { path, source } => {
                format!("The settings file at {} is invalid: {}", path.display(), source.message())
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not save the file to {}. Please check disk space and permissions.",
                    target_path.display()
                )
            }
            Self::TaskFailed { operation, .. } => {
                format!("The background {operation} was interrupted.")
            }
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that the file exists and you have permission to read it.".into())
                } else {
                    Some("Check that you have permission to write to this location.".into())
                }
            }
            Self::InvalidFormat { .. } => Some("Make sure you selected a session file.".into()),
            Self::UnsupportedVersion { .. } => Some("Update the editor to open this session.".into()),
            Self::FingerprintMismatch { .. } => {
                Some("Start a new session from the current document.".into())
            }
            Self::Serialization { .. } | Self::TaskFailed { .. } => None,
            Self::Deserialization { .. } => Some("Try opening a backup if you have one.".into()),
            Self::Settings { .. } => {
                Some("Fix or delete the settings file to restore the defaults.".into())
            }
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or try saving to a different location.".into())
            }
        }
    }
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;
