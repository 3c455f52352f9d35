//! Loaded controlled-terminology packages.
//!
//! A package is one CT release (e.g. "SDTM CT 2024-03-29") loaded next to
//! the document so that code lists can be checked and refreshed against it.
//! Packages are keyed by the OID of the controlled-terminology
//! [`crate::Standard`] they back.
//!
//! Each package contains two levels:
//!
//! - **Code lists** (parent): NCI code, name, extensibility
//! - **Terms** (children): NCI code, submission value, decode

use serde::{Deserialize, Serialize};

use crate::Oid;

/// A single term within a terminology code list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// NCI concept code for this term (e.g. "C20197" for Male).
    pub code: String,

    /// The permissible value in datasets (e.g. "M").
    pub submission_value: String,

    /// Preferred decode text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decode: Option<String>,
}

/// A code list as published in a CT release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminologyCodeList {
    /// NCI code for this code list (e.g. "C66731" for Sex).
    pub code: String,

    pub name: String,

    /// Whether sponsors can add values not in this code list.
    #[serde(default)]
    pub extensible: bool,

    /// Terms in publication order.
    #[serde(default)]
    pub terms: Vec<Term>,
}

impl TerminologyCodeList {
    pub fn submission_values(&self) -> Vec<&str> {
        self.terms
            .iter()
            .map(|t| t.submission_value.as_str())
            .collect()
    }

    /// Case-insensitive term lookup by submission value.
    pub fn term(&self, value: &str) -> Option<&Term> {
        self.terms
            .iter()
            .find(|t| t.submission_value.eq_ignore_ascii_case(value))
    }
}

/// A CT release (e.g. "SDTM CT 2024-03-29").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminologyPackage {
    pub oid: Oid,

    /// Display label (e.g. "SDTM CT").
    pub label: String,

    /// Release version/date (e.g. "2024-03-29").
    pub version: String,

    /// Publishing set (e.g. "SDTM", "SEND", "ADaM").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publishing_set: Option<String>,

    /// Code lists in publication order.
    #[serde(default)]
    pub code_lists: Vec<TerminologyCodeList>,
}

impl TerminologyPackage {
    pub fn new(oid: Oid, label: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            oid,
            label: label.into(),
            version: version.into(),
            publishing_set: None,
            code_lists: Vec::new(),
        }
    }

    /// Get a code list by NCI code (case-insensitive).
    pub fn code_list(&self, code: &str) -> Option<&TerminologyCodeList> {
        let code = code.trim();
        self.code_lists
            .iter()
            .find(|cl| cl.code.eq_ignore_ascii_case(code))
    }
}
