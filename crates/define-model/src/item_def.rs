use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{DocumentRef, Oid, TranslatedText};

/// Define-XML data types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataType {
    #[default]
    Text,
    Integer,
    Float,
    Date,
    DateTime,
    Time,
    PartialDate,
    PartialTime,
    PartialDatetime,
    IncompleteDatetime,
    DurationDatetime,
}

impl DataType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Time => "time",
            Self::PartialDate => "partialDate",
            Self::PartialTime => "partialTime",
            Self::PartialDatetime => "partialDatetime",
            Self::IncompleteDatetime => "incompleteDatetime",
            Self::DurationDatetime => "durationDatetime",
        }
    }

    /// Whether `length` is meaningful for this type.
    pub fn has_length(self) -> bool {
        matches!(self, Self::Text | Self::Integer | Self::Float)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OriginKind {
    Collected,
    Derived,
    Assigned,
    Protocol,
    Predecessor,
    NotAvailable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origin {
    pub kind: OriginKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub descriptions: Vec<TranslatedText>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub documents: Vec<DocumentRef>,
}

/// Field-level definition (`ItemDef`). Owned by no item group; referenced
/// from item groups through [`crate::ItemRef::item_oid`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDef {
    pub oid: Oid,
    pub name: String,
    #[serde(default)]
    pub data_type: DataType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub significant_digits: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_format: Option<String>,
    #[serde(default)]
    pub descriptions: Vec<TranslatedText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_list_oid: Option<Oid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_oid: Option<Oid>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub origins: Vec<Origin>,
}

impl ItemDef {
    pub fn new(oid: Oid, name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            oid,
            name: name.into(),
            data_type,
            length: None,
            significant_digits: None,
            display_format: None,
            descriptions: Vec::new(),
            code_list_oid: None,
            comment_oid: None,
            origins: Vec::new(),
        }
    }
}
