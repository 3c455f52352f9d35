use serde::{Deserialize, Serialize};

use crate::Oid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StandardKind {
    ImplementationGuide,
    ControlledTerminology,
}

/// A standard the document conforms to (e.g. `SDTMIG 3.3`, `CDISC/NCI SDTM CT 2024-03-29`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standard {
    pub oid: Oid,
    pub name: String,
    pub kind: StandardKind,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publishing_set: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_oid: Option<Oid>,
    #[serde(default)]
    pub is_default: bool,
}

impl Standard {
    pub fn new(
        oid: Oid,
        name: impl Into<String>,
        kind: StandardKind,
        version: impl Into<String>,
    ) -> Self {
        Self {
            oid,
            name: name.into(),
            kind,
            version: version.into(),
            publishing_set: None,
            status: None,
            comment_oid: None,
            is_default: false,
        }
    }

    /// Display label, e.g. `SDTMIG 3.3`.
    pub fn label(&self) -> String {
        format!("{} {}", self.name, self.version)
    }
}
