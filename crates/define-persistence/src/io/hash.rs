//! Document fingerprints.

use define_model::Document;
use sha2::{Digest, Sha256};

use crate::error::{PersistenceError, Result};

/// Hex-encoded SHA-256 of `bytes`.
pub fn fingerprint_bytes(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Fingerprint of a document's canonical JSON form.
///
/// Collections are ordered maps, so equal documents always serialize to
/// the same bytes.
pub fn document_fingerprint(document: &Document) -> Result<String> {
    let bytes = serde_json::to_vec(document).map_err(|e| PersistenceError::Serialization {
        what: "document",
        source: Box::new(e),
    })?;
    Ok(fingerprint_bytes(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use define_model::Oid;

    #[test]
    fn known_digest() {
        // Known SHA-256 hash for "Hello, World!"
        assert_eq!(
            fingerprint_bytes(b"Hello, World!"),
            "dffd6021bb2bd5b0af676290809ec3a53191dd81c7f70a4b28688a362182986f"
        );
    }

    #[test]
    fn equal_documents_share_a_fingerprint() {
        let make = || {
            Document::new(
                Oid::new("ST.A").unwrap(),
                Oid::new("MDV.A").unwrap(),
                "A",
            )
        };
        let a = document_fingerprint(&make()).unwrap();
        assert_eq!(a, document_fingerprint(&make()).unwrap());

        let mut other = make();
        other.study.global_variables.protocol_name = "P-01".to_string();
        assert_ne!(a, document_fingerprint(&other).unwrap());
    }
}
