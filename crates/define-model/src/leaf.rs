//! External document references.
//!
//! A [`Leaf`] points at a file shipped alongside the define document
//! (annotated CRF, reviewer guide, ...). Comments, methods, origins and
//! result displays attach to leafs through [`DocumentRef`].

use serde::{Deserialize, Serialize};

use crate::Oid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeafKind {
    AnnotatedCrf,
    SupplementalDoc,
    #[default]
    Other,
}

/// Reference to an external file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaf {
    pub oid: Oid,
    #[serde(default)]
    pub kind: LeafKind,
    pub title: String,
    /// Path relative to `base_folder`.
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_folder: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageRefKind {
    #[default]
    PhysicalRef,
    NamedDestination,
}

/// Page selection inside a PDF leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfPageRef {
    #[serde(default)]
    pub kind: PageRefKind,
    /// Space separated page numbers or destination names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_refs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Attachment of a leaf to an annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    pub leaf_oid: Oid,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pdf_page_refs: Vec<PdfPageRef>,
}

impl DocumentRef {
    pub fn new(leaf_oid: Oid) -> Self {
        Self {
            leaf_oid,
            pdf_page_refs: Vec::new(),
        }
    }
}
