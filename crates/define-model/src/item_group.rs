use serde::{Deserialize, Serialize};

use crate::{Oid, TranslatedText};

/// Reference from an item group to an item definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRef {
    pub oid: Oid,
    pub item_oid: Oid,
    #[serde(default)]
    pub mandatory: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_sequence: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_oid: Option<Oid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl ItemRef {
    pub fn new(oid: Oid, item_oid: Oid) -> Self {
        Self {
            oid,
            item_oid,
            mandatory: false,
            order_number: None,
            key_sequence: None,
            method_oid: None,
            role: None,
        }
    }
}

/// Dataset-level entity (`ItemGroupDef`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemGroup {
    pub oid: Oid,
    pub name: String,
    #[serde(default)]
    pub descriptions: Vec<TranslatedText>,
    #[serde(default)]
    pub repeating: bool,
    #[serde(default)]
    pub is_reference_data: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure: Option<String>,
    /// Dataset class name; must be one of the constant class table entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_class: Option<String>,
    /// Leaf holding the dataset file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive_location_oid: Option<Oid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_oid: Option<Oid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard_oid: Option<Oid>,
    #[serde(default)]
    pub item_refs: Vec<ItemRef>,
}

impl ItemGroup {
    pub fn new(oid: Oid, name: impl Into<String>) -> Self {
        Self {
            oid,
            name: name.into(),
            descriptions: Vec::new(),
            repeating: false,
            is_reference_data: false,
            purpose: None,
            structure: None,
            dataset_class: None,
            archive_location_oid: None,
            comment_oid: None,
            standard_oid: None,
            item_refs: Vec::new(),
        }
    }

    pub fn item_ref(&self, oid: &Oid) -> Option<&ItemRef> {
        self.item_refs.iter().find(|r| &r.oid == oid)
    }

    pub fn item_ref_mut(&mut self, oid: &Oid) -> Option<&mut ItemRef> {
        self.item_refs.iter_mut().find(|r| &r.oid == oid)
    }

    pub fn references_item(&self, item_oid: &Oid) -> bool {
        self.item_refs.iter().any(|r| &r.item_oid == item_oid)
    }
}
