//! Define documents as JSON files.

use std::fs;
use std::path::Path;

use define_model::Document;

use super::save::write_atomic;
use crate::error::{PersistenceError, Result};

/// Read a document from a JSON file.
pub fn read_document(path: &Path) -> Result<Document> {
    let bytes = fs::read(path).map_err(|e| PersistenceError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source: e,
    })?;
    let document: Document =
        serde_json::from_slice(&bytes).map_err(|e| PersistenceError::Deserialization {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;
    tracing::info!(
        path = %path.display(),
        study = %document.study.global_variables.study_name,
        "read document"
    );
    Ok(document)
}

/// Write a document as pretty-printed JSON.
pub fn write_document(document: &Document, path: &Path) -> Result<()> {
    let bytes =
        serde_json::to_vec_pretty(document).map_err(|e| PersistenceError::Serialization {
            what: "document",
            source: Box::new(e),
        })?;
    write_atomic(path, &bytes)?;
    tracing::info!(path = %path.display(), "wrote document");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use define_model::Oid;
    use tempfile::tempdir;

    #[test]
    fn written_document_reads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("define.json");
        let document = Document::new(
            Oid::new("ST.A").unwrap(),
            Oid::new("MDV.A").unwrap(),
            "A",
        );

        write_document(&document, &path).unwrap();
        assert_eq!(read_document(&path).unwrap(), document);
    }

    #[test]
    fn blank_oid_in_file_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("define.json");
        fs::write(
            &path,
            br#"{"study": {"oid": " ", "global_variables": {"study_name": "A"},
                "metadata_version": {"oid": "MDV.A", "name": "A"}}}"#,
        )
        .unwrap();

        assert!(matches!(
            read_document(&path),
            Err(PersistenceError::Deserialization { .. })
        ));
    }
}
