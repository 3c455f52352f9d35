//! Document root: study, metadata version and the normalized entity maps.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    AnalysisResult, CodeList, Comment, ItemDef, ItemGroup, Leaf, Method, Oid, OidKind,
    OrderStore, ResultDisplay, Standard, TerminologyPackage,
};

/// Define-XML version written by default for new documents.
pub const DEFAULT_DEFINE_VERSION: &str = "2.1.0";

/// The composed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub study: Study,
    /// Loaded controlled-terminology packages keyed by standard OID.
    #[serde(default)]
    pub terminology: BTreeMap<Oid, TerminologyPackage>,
}

impl Document {
    /// An empty document with a single study and metadata version.
    pub fn new(study_oid: Oid, mdv_oid: Oid, study_name: impl Into<String>) -> Self {
        Self {
            study: Study {
                oid: study_oid,
                global_variables: GlobalVariables {
                    study_name: study_name.into(),
                    study_description: String::new(),
                    protocol_name: String::new(),
                },
                metadata_version: MetadataVersion::new(mdv_oid),
            },
            terminology: BTreeMap::new(),
        }
    }

    pub fn mdv(&self) -> &MetadataVersion {
        &self.study.metadata_version
    }

    pub fn mdv_mut(&mut self) -> &mut MetadataVersion {
        &mut self.study.metadata_version
    }

    /// Whether `oid` names any entity in the document.
    pub fn contains_oid(&self, oid: &Oid) -> bool {
        &self.study.oid == oid
            || self.terminology.contains_key(oid)
            || self.study.metadata_version.contains_oid(oid)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Study {
    pub oid: Oid,
    pub global_variables: GlobalVariables,
    pub metadata_version: MetadataVersion,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalVariables {
    pub study_name: String,
    #[serde(default)]
    pub study_description: String,
    #[serde(default)]
    pub protocol_name: String,
}

/// Display/serialization order of the ordered collections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    #[serde(default)]
    pub item_groups: OrderStore,
    #[serde(default)]
    pub code_lists: OrderStore,
    #[serde(default)]
    pub leafs: OrderStore,
    #[serde(default)]
    pub standards: OrderStore,
}

impl Order {
    /// Order store tracking entities of `kind`, if that kind is ordered.
    pub fn store(&self, kind: OidKind) -> Option<&OrderStore> {
        match kind {
            OidKind::ItemGroup => Some(&self.item_groups),
            OidKind::CodeList => Some(&self.code_lists),
            OidKind::Leaf => Some(&self.leafs),
            OidKind::Standard => Some(&self.standards),
            _ => None,
        }
    }

    pub fn store_mut(&mut self, kind: OidKind) -> Option<&mut OrderStore> {
        match kind {
            OidKind::ItemGroup => Some(&mut self.item_groups),
            OidKind::CodeList => Some(&mut self.code_lists),
            OidKind::Leaf => Some(&mut self.leafs),
            OidKind::Standard => Some(&mut self.standards),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataVersion {
    pub oid: Oid,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_define_version")]
    pub define_version: String,
    #[serde(default)]
    pub item_groups: BTreeMap<Oid, ItemGroup>,
    #[serde(default)]
    pub item_defs: BTreeMap<Oid, ItemDef>,
    #[serde(default)]
    pub code_lists: BTreeMap<Oid, CodeList>,
    #[serde(default)]
    pub standards: BTreeMap<Oid, Standard>,
    #[serde(default)]
    pub comments: BTreeMap<Oid, Comment>,
    #[serde(default)]
    pub methods: BTreeMap<Oid, Method>,
    #[serde(default)]
    pub leafs: BTreeMap<Oid, Leaf>,
    #[serde(default)]
    pub result_displays: BTreeMap<Oid, ResultDisplay>,
    #[serde(default)]
    pub analysis_results: BTreeMap<Oid, AnalysisResult>,
    #[serde(default)]
    pub order: Order,
}

fn default_define_version() -> String {
    DEFAULT_DEFINE_VERSION.to_string()
}

impl MetadataVersion {
    pub fn new(oid: Oid) -> Self {
        Self {
            oid,
            name: String::new(),
            description: None,
            define_version: default_define_version(),
            item_groups: BTreeMap::new(),
            item_defs: BTreeMap::new(),
            code_lists: BTreeMap::new(),
            standards: BTreeMap::new(),
            comments: BTreeMap::new(),
            methods: BTreeMap::new(),
            leafs: BTreeMap::new(),
            result_displays: BTreeMap::new(),
            analysis_results: BTreeMap::new(),
            order: Order::default(),
        }
    }

    /// Item groups in display order.
    pub fn ordered_item_groups(&self) -> impl Iterator<Item = &ItemGroup> {
        self.order
            .item_groups
            .iter()
            .filter_map(|oid| self.item_groups.get(oid))
    }

    /// Code lists in display order.
    pub fn ordered_code_lists(&self) -> impl Iterator<Item = &CodeList> {
        self.order
            .code_lists
            .iter()
            .filter_map(|oid| self.code_lists.get(oid))
    }

    /// Key set of the content map matching an ordered kind.
    pub fn keys_of(&self, kind: OidKind) -> Vec<&Oid> {
        match kind {
            OidKind::ItemGroup => self.item_groups.keys().collect(),
            OidKind::ItemDef => self.item_defs.keys().collect(),
            OidKind::CodeList => self.code_lists.keys().collect(),
            OidKind::Standard => self.standards.keys().collect(),
            OidKind::Comment => self.comments.keys().collect(),
            OidKind::Method => self.methods.keys().collect(),
            OidKind::Leaf => self.leafs.keys().collect(),
            OidKind::ResultDisplay => self.result_displays.keys().collect(),
            OidKind::AnalysisResult => self.analysis_results.keys().collect(),
            OidKind::ItemRef => self
                .item_groups
                .values()
                .flat_map(|g| g.item_refs.iter().map(|r| &r.oid))
                .collect(),
            OidKind::CodeListItem => self
                .code_lists
                .values()
                .flat_map(|cl| cl.items.iter().map(|i| &i.oid))
                .collect(),
            OidKind::Study | OidKind::MetadataVersion | OidKind::Terminology => Vec::new(),
        }
    }

    pub fn contains_oid(&self, oid: &Oid) -> bool {
        &self.oid == oid
            || self.item_groups.contains_key(oid)
            || self.item_defs.contains_key(oid)
            || self.code_lists.contains_key(oid)
            || self.standards.contains_key(oid)
            || self.comments.contains_key(oid)
            || self.methods.contains_key(oid)
            || self.leafs.contains_key(oid)
            || self.result_displays.contains_key(oid)
            || self.analysis_results.contains_key(oid)
            || self
                .item_groups
                .values()
                .any(|g| g.item_refs.iter().any(|r| &r.oid == oid))
            || self
                .code_lists
                .values()
                .any(|cl| cl.items.contains(oid))
    }
}
