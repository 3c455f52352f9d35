//! Free-text annotations: comments and methods.

use serde::{Deserialize, Serialize};

use crate::{DocumentRef, Oid, TranslatedText};

/// A comment attached by reference to item groups, item definitions,
/// code lists, standards or analysis results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub oid: Oid,
    #[serde(default)]
    pub descriptions: Vec<TranslatedText>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub documents: Vec<DocumentRef>,
}

impl Comment {
    pub fn new(oid: Oid, text: impl Into<String>) -> Self {
        Self {
            oid,
            descriptions: vec![TranslatedText::new(text)],
            documents: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    #[default]
    Computation,
    Imputation,
}

/// Machine-readable derivation code attached to a method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormalExpression {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub value: String,
}

/// A derivation or imputation method referenced from item references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub oid: Oid,
    pub name: String,
    /// When set, `name` is derived from the referencing variables and is
    /// not part of the method's content.
    #[serde(default)]
    pub auto_method_name: bool,
    #[serde(default)]
    pub kind: MethodKind,
    #[serde(default)]
    pub descriptions: Vec<TranslatedText>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub documents: Vec<DocumentRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub formal_expressions: Vec<FormalExpression>,
}

impl Method {
    pub fn new(oid: Oid, name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            oid,
            name: name.into(),
            auto_method_name: false,
            kind: MethodKind::default(),
            descriptions: vec![TranslatedText::new(text)],
            documents: Vec::new(),
            formal_expressions: Vec::new(),
        }
    }
}
