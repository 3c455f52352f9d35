//! Store error types.

use define_model::{ModelError, Oid, OidKind};
use thiserror::Error;

use crate::integrity::IntegrityReport;

/// Error raised while composing a new document frame.
///
/// A failed action never leaves a partially applied document behind: the
/// composer works on a private copy that is discarded on error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// An update or attachment named an identifier that does not exist.
    #[error("unknown {kind} {oid}")]
    UnknownOid { kind: OidKind, oid: Oid },

    /// An add action reused an identifier already present.
    #[error("{kind} {oid} already exists")]
    DuplicateOid { kind: OidKind, oid: Oid },

    /// The composed document violates a structural invariant.
    #[error("integrity check failed: {0}")]
    Integrity(IntegrityReport),

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, StoreError>;
