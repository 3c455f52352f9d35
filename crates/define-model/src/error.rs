use thiserror::Error;

use crate::ids::OidKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("invalid identifier: {0:?}")]
    InvalidOid(String),

    #[error("invalid {kind} update: {field} {reason}")]
    InvalidUpdate {
        kind: OidKind,
        field: &'static str,
        reason: &'static str,
    },

    #[error("reorder of {collection} is not a permutation of the current order")]
    InvalidReorder { collection: &'static str },
}

pub type Result<T> = std::result::Result<T, ModelError>;
