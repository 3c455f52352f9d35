//! Static constant tables.
//!
//! These are not part of the document: they are compiled into the editor
//! (or loaded alongside it) and are never snapshotted.

use serde::{Deserialize, Serialize};

/// SDTM, SEND and ADaM dataset classes accepted by Define-XML 2.1.
pub const DATASET_CLASSES: &[&str] = &[
    "TRIAL DESIGN",
    "SPECIAL PURPOSE",
    "INTERVENTIONS",
    "EVENTS",
    "FINDINGS",
    "FINDINGS ABOUT",
    "RELATIONSHIP",
    "STUDY REFERENCE",
    "SUBJECT LEVEL ANALYSIS DATASET",
    "BASIC DATA STRUCTURE",
    "OCCURRENCE DATA STRUCTURE",
    "ADAM OTHER",
];

/// Item group purposes.
pub const ITEM_GROUP_PURPOSES: &[&str] = &["Tabulation", "Analysis"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StdConstants {
    pub dataset_classes: Vec<String>,
    pub item_group_purposes: Vec<String>,
}

impl Default for StdConstants {
    fn default() -> Self {
        Self {
            dataset_classes: DATASET_CLASSES.iter().map(|c| (*c).to_string()).collect(),
            item_group_purposes: ITEM_GROUP_PURPOSES
                .iter()
                .map(|c| (*c).to_string())
                .collect(),
        }
    }
}

impl StdConstants {
    /// Case-insensitive membership test for a dataset class name.
    pub fn is_dataset_class(&self, name: &str) -> bool {
        let name = name.trim();
        self.dataset_classes
            .iter()
            .any(|c| c.eq_ignore_ascii_case(name))
    }
}
