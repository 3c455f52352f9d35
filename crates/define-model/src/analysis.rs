//! Analysis results metadata (ARM): result displays and their analysis results.

use serde::{Deserialize, Serialize};

use crate::{DocumentRef, Oid, TranslatedText};

/// A table, figure or listing produced by the analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultDisplay {
    pub oid: Oid,
    pub name: String,
    #[serde(default)]
    pub descriptions: Vec<TranslatedText>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub documents: Vec<DocumentRef>,
    /// Analysis results shown by this display, in display order.
    #[serde(default)]
    pub analysis_result_oids: Vec<Oid>,
}

impl ResultDisplay {
    pub fn new(oid: Oid, name: impl Into<String>) -> Self {
        Self {
            oid,
            name: name.into(),
            descriptions: Vec::new(),
            documents: Vec::new(),
            analysis_result_oids: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub oid: Oid,
    #[serde(default)]
    pub descriptions: Vec<TranslatedText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    /// Parameter variable (e.g. `PARAMCD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_oid: Option<Oid>,
    /// Analysis datasets used by the result.
    #[serde(default)]
    pub analysis_dataset_oids: Vec<Oid>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub documents: Vec<DocumentRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_oid: Option<Oid>,
}

impl AnalysisResult {
    pub fn new(oid: Oid) -> Self {
        Self {
            oid,
            descriptions: Vec::new(),
            reason: None,
            purpose: None,
            parameter_oid: None,
            analysis_dataset_oids: Vec::new(),
            documents: Vec::new(),
            comment_oid: None,
        }
    }
}
