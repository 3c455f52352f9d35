//! Code lists as recorded in the define document.
//!
//! A code list comes in three shapes:
//!
//! - **Decoded**: every coded value carries a decode text
//! - **Enumerated**: coded values only
//! - **External**: values live in an external dictionary (MedDRA, WHODrug)
//!
//! ## Item order
//!
//! The order of coded values is part of the document: it is what gets
//! written back and what the editor shows. It is carried by
//! [`CodeListItems`], an explicit sequence of items each holding its own
//! identifier, so that lookups by identifier never disturb the order.

use serde::{Deserialize, Serialize};

use crate::{DataType, Oid, TranslatedText};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeListKind {
    #[default]
    Decoded,
    Enumerated,
    External,
}

/// Alias such as the NCI C-code of a controlled-terminology entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    pub context: String,
    pub name: String,
}

impl Alias {
    pub fn nci(code: impl Into<String>) -> Self {
        Self {
            context: "nci:ExtCodeID".to_string(),
            name: code.into(),
        }
    }
}

/// One coded value of a code list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeListItem {
    pub oid: Oid,
    pub coded_value: String,
    /// Decode texts. Empty for enumerated code lists.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub decode: Vec<TranslatedText>,
    /// Sponsor extension of an extensible CT code list.
    #[serde(default)]
    pub extended_value: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<Alias>,
}

impl CodeListItem {
    pub fn new(oid: Oid, coded_value: impl Into<String>) -> Self {
        Self {
            oid,
            coded_value: coded_value.into(),
            decode: Vec::new(),
            extended_value: false,
            rank: None,
            alias: None,
        }
    }

    pub fn decoded(oid: Oid, coded_value: impl Into<String>, decode: impl Into<String>) -> Self {
        Self {
            decode: vec![TranslatedText::new(decode)],
            ..Self::new(oid, coded_value)
        }
    }
}

/// Ordered sequence of code-list items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodeListItems(Vec<CodeListItem>);

impl CodeListItems {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CodeListItem> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[CodeListItem] {
        &self.0
    }

    pub fn get(&self, oid: &Oid) -> Option<&CodeListItem> {
        self.0.iter().find(|item| &item.oid == oid)
    }

    pub fn get_mut(&mut self, oid: &Oid) -> Option<&mut CodeListItem> {
        self.0.iter_mut().find(|item| &item.oid == oid)
    }

    pub fn contains(&self, oid: &Oid) -> bool {
        self.get(oid).is_some()
    }

    /// Append an item. Returns `false` (and leaves the list untouched) when
    /// an item with the same identifier exists.
    pub fn push(&mut self, item: CodeListItem) -> bool {
        if self.contains(&item.oid) {
            return false;
        }
        self.0.push(item);
        true
    }

    /// Remove items by identifier; absent identifiers are ignored.
    pub fn remove(&mut self, oids: &[Oid]) -> usize {
        let before = self.0.len();
        self.0.retain(|item| !oids.contains(&item.oid));
        before - self.0.len()
    }

    /// Coded values in the recorded order.
    pub fn coded_values(&self) -> Vec<&str> {
        self.0.iter().map(|item| item.coded_value.as_str()).collect()
    }

    /// Rearrange items to follow `sequence`. Returns `false` and leaves the
    /// list untouched unless `sequence` names every item exactly once.
    pub fn reorder(&mut self, sequence: &[Oid]) -> bool {
        if sequence.len() != self.0.len() {
            return false;
        }
        let mut reordered = Vec::with_capacity(self.0.len());
        for oid in sequence {
            match self.0.iter().find(|item| &item.oid == oid) {
                Some(item) if !reordered.iter().any(|r: &CodeListItem| &r.oid == oid) => {
                    reordered.push(item.clone());
                }
                _ => return false,
            }
        }
        self.0 = reordered;
        true
    }

    /// Stable ascending sort by a display key.
    pub fn sort_by_key<K: Ord>(&mut self, key: impl FnMut(&CodeListItem) -> K) {
        self.0.sort_by_cached_key(key);
    }
}

impl FromIterator<CodeListItem> for CodeListItems {
    fn from_iter<I: IntoIterator<Item = CodeListItem>>(iter: I) -> Self {
        let mut items = Self::new();
        for item in iter {
            items.push(item);
        }
        items
    }
}

impl<'a> IntoIterator for &'a CodeListItems {
    type Item = &'a CodeListItem;
    type IntoIter = std::slice::Iter<'a, CodeListItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Reference to an external dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalCodeList {
    pub dictionary: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeList {
    pub oid: Oid,
    pub name: String,
    #[serde(default)]
    pub kind: CodeListKind,
    #[serde(default)]
    pub data_type: DataType,
    #[serde(default)]
    pub items: CodeListItems,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external: Option<ExternalCodeList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<Alias>,
    /// Controlled-terminology standard the list was taken from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard_oid: Option<Oid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_oid: Option<Oid>,
}

impl CodeList {
    pub fn new(oid: Oid, name: impl Into<String>, kind: CodeListKind) -> Self {
        Self {
            oid,
            name: name.into(),
            kind,
            data_type: DataType::Text,
            items: CodeListItems::new(),
            external: None,
            alias: None,
            standard_oid: None,
            comment_oid: None,
        }
    }

    /// Coded values in the recorded order. External code lists have none.
    pub fn coded_values(&self) -> Vec<&str> {
        match self.kind {
            CodeListKind::External => Vec::new(),
            CodeListKind::Decoded | CodeListKind::Enumerated => self.items.coded_values(),
        }
    }

    /// NCI code of the list, when it was taken from controlled terminology.
    pub fn nci_code(&self) -> Option<&str> {
        self.alias.as_ref().map(|a| a.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oid(value: &str) -> Oid {
        Oid::new(value).unwrap()
    }

    #[test]
    fn coded_values_follow_recorded_order() {
        let mut list = CodeList::new(oid("CL.SEX"), "Sex", CodeListKind::Decoded);
        list.items.push(CodeListItem::decoded(oid("CLI.U"), "U", "Unknown"));
        list.items.push(CodeListItem::decoded(oid("CLI.F"), "F", "Female"));
        list.items.push(CodeListItem::decoded(oid("CLI.M"), "M", "Male"));

        assert_eq!(list.coded_values(), vec!["U", "F", "M"]);
    }

    #[test]
    fn duplicate_item_is_not_pushed() {
        let mut items = CodeListItems::new();
        assert!(items.push(CodeListItem::new(oid("CLI.Y"), "Y")));
        assert!(!items.push(CodeListItem::new(oid("CLI.Y"), "YES")));
        assert_eq!(items.coded_values(), vec!["Y"]);
    }

    #[test]
    fn reorder_rejects_partial_sequence() {
        let mut items: CodeListItems = [
            CodeListItem::new(oid("CLI.A"), "A"),
            CodeListItem::new(oid("CLI.B"), "B"),
        ]
        .into_iter()
        .collect();

        assert!(!items.reorder(&[oid("CLI.B")]));
        assert!(!items.reorder(&[oid("CLI.B"), oid("CLI.B")]));
        assert!(items.reorder(&[oid("CLI.B"), oid("CLI.A")]));
        assert_eq!(items.coded_values(), vec!["B", "A"]);
    }

    #[test]
    fn external_list_has_no_coded_values() {
        let mut list = CodeList::new(oid("CL.AEDICT"), "MedDRA", CodeListKind::External);
        list.items.push(CodeListItem::new(oid("CLI.X"), "X"));
        assert!(list.coded_values().is_empty());
    }
}
