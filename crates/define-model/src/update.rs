//! Typed partial updates.
//!
//! Every editable entity has an `*Update` struct listing exactly the fields
//! an update action may touch. Required fields use `Option<T>` (absent =
//! keep); optional fields use [`Field<T>`] so that an update can clear them.
//! Updates are validated before they are merged onto a copy of the entity.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::{
    Alias, AnalysisResult, CodeList, CodeListItem, CodeListKind, Comment, DataType, DocumentRef,
    ExternalCodeList, FormalExpression, GlobalVariables, ItemDef, ItemGroup, ItemRef, Leaf,
    LeafKind, MetadataVersion, Method, MethodKind, Oid, OidKind, Origin, ResultDisplay, Standard,
    TranslatedText,
};

/// Change to an optional field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum Field<T> {
    Keep,
    Set(T),
    Clear,
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Self::Keep
    }
}

impl<T> Field<T> {
    pub fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }

    pub fn as_set(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Keep | Self::Clear => None,
        }
    }
}

impl<T: Clone> Field<T> {
    pub fn merge(&self, slot: &mut Option<T>) {
        match self {
            Self::Keep => {}
            Self::Set(value) => *slot = Some(value.clone()),
            Self::Clear => *slot = None,
        }
    }
}

/// A partial update of an entity of type `T`.
pub trait Patch<T: Clone> {
    const KIND: OidKind;

    /// Check the update against the entity's field constraints.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn merge_into(&self, target: &mut T);

    /// Validate, then return a merged copy of `target`.
    fn apply_to(&self, target: &T) -> Result<T> {
        self.validate()?;
        let mut merged = target.clone();
        self.merge_into(&mut merged);
        Ok(merged)
    }
}

fn set<T: Clone>(slot: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *slot = value.clone();
    }
}

fn require_text(kind: OidKind, field: &'static str, value: Option<&String>) -> Result<()> {
    match value {
        Some(text) if text.trim().is_empty() => Err(ModelError::InvalidUpdate {
            kind,
            field,
            reason: "must not be blank",
        }),
        _ => Ok(()),
    }
}

fn require_positive(kind: OidKind, field: &'static str, value: Option<&u32>) -> Result<()> {
    match value {
        Some(0) => Err(ModelError::InvalidUpdate {
            kind,
            field,
            reason: "must be greater than zero",
        }),
        _ => Ok(()),
    }
}

// ============================================================================
// Study
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalVariablesUpdate {
    pub study_name: Option<String>,
    pub study_description: Option<String>,
    pub protocol_name: Option<String>,
}

impl Patch<GlobalVariables> for GlobalVariablesUpdate {
    const KIND: OidKind = OidKind::Study;

    fn validate(&self) -> Result<()> {
        require_text(Self::KIND, "study_name", self.study_name.as_ref())
    }

    fn merge_into(&self, target: &mut GlobalVariables) {
        set(&mut target.study_name, &self.study_name);
        set(&mut target.study_description, &self.study_description);
        set(&mut target.protocol_name, &self.protocol_name);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataVersionUpdate {
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Field::is_keep")]
    pub description: Field<String>,
    pub define_version: Option<String>,
}

impl Patch<MetadataVersion> for MetadataVersionUpdate {
    const KIND: OidKind = OidKind::MetadataVersion;

    fn validate(&self) -> Result<()> {
        require_text(Self::KIND, "define_version", self.define_version.as_ref())
    }

    fn merge_into(&self, target: &mut MetadataVersion) {
        set(&mut target.name, &self.name);
        self.description.merge(&mut target.description);
        set(&mut target.define_version, &self.define_version);
    }
}

// ============================================================================
// Item groups and item references
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemGroupUpdate {
    pub name: Option<String>,
    pub descriptions: Option<Vec<TranslatedText>>,
    pub repeating: Option<bool>,
    pub is_reference_data: Option<bool>,
    #[serde(skip_serializing_if = "Field::is_keep")]
    pub purpose: Field<String>,
    #[serde(skip_serializing_if = "Field::is_keep")]
    pub structure: Field<String>,
    #[serde(skip_serializing_if = "Field::is_keep")]
    pub dataset_class: Field<String>,
    #[serde(skip_serializing_if = "Field::is_keep")]
    pub archive_location_oid: Field<Oid>,
    #[serde(skip_serializing_if = "Field::is_keep")]
    pub comment_oid: Field<Oid>,
    #[serde(skip_serializing_if = "Field::is_keep")]
    pub standard_oid: Field<Oid>,
}

impl Patch<ItemGroup> for ItemGroupUpdate {
    const KIND: OidKind = OidKind::ItemGroup;

    fn validate(&self) -> Result<()> {
        require_text(Self::KIND, "name", self.name.as_ref())?;
        require_text(Self::KIND, "purpose", self.purpose.as_set())?;
        require_text(Self::KIND, "dataset_class", self.dataset_class.as_set())
    }

    fn merge_into(&self, target: &mut ItemGroup) {
        set(&mut target.name, &self.name);
        set(&mut target.descriptions, &self.descriptions);
        set(&mut target.repeating, &self.repeating);
        set(&mut target.is_reference_data, &self.is_reference_data);
        self.purpose.merge(&mut target.purpose);
        self.structure.merge(&mut target.structure);
        self.dataset_class.merge(&mut target.dataset_class);
        self.archive_location_oid
            .merge(&mut target.archive_location_oid);
        self.comment_oid.merge(&mut target.comment_oid);
        self.standard_oid.merge(&mut target.standard_oid);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemRefUpdate {
    pub mandatory: Option<bool>,
    #[serde(skip_serializing_if = "Field::is_keep")]
    pub order_number: Field<u32>,
    #[serde(skip_serializing_if = "Field::is_keep")]
    pub key_sequence: Field<u32>,
    #[serde(skip_serializing_if = "Field::is_keep")]
    pub method_oid: Field<Oid>,
    #[serde(skip_serializing_if = "Field::is_keep")]
    pub role: Field<String>,
}

impl Patch<ItemRef> for ItemRefUpdate {
    const KIND: OidKind = OidKind::ItemRef;

    fn validate(&self) -> Result<()> {
        require_positive(Self::KIND, "order_number", self.order_number.as_set())?;
        require_positive(Self::KIND, "key_sequence", self.key_sequence.as_set())
    }

    fn merge_into(&self, target: &mut ItemRef) {
        set(&mut target.mandatory, &self.mandatory);
        self.order_number.merge(&mut target.order_number);
        self.key_sequence.merge(&mut target.key_sequence);
        self.method_oid.merge(&mut target.method_oid);
        self.role.merge(&mut target.role);
    }
}

// ============================================================================
// Item definitions
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemDefUpdate {
    pub name: Option<String>,
    pub data_type: Option<DataType>,
    #[serde(skip_serializing_if = "Field::is_keep")]
    pub length: Field<u32>,
    #[serde(skip_serializing_if = "Field::is_keep")]
    pub significant_digits: Field<u32>,
    #[serde(skip_serializing_if = "Field::is_keep")]
    pub display_format: Field<String>,
    pub descriptions: Option<Vec<TranslatedText>>,
    #[serde(skip_serializing_if = "Field::is_keep")]
    pub code_list_oid: Field<Oid>,
    #[serde(skip_serializing_if = "Field::is_keep")]
    pub comment_oid: Field<Oid>,
    pub origins: Option<Vec<Origin>>,
}

impl Patch<ItemDef> for ItemDefUpdate {
    const KIND: OidKind = OidKind::ItemDef;

    fn validate(&self) -> Result<()> {
        require_text(Self::KIND, "name", self.name.as_ref())?;
        require_positive(Self::KIND, "length", self.length.as_set())
    }

    fn merge_into(&self, target: &mut ItemDef) {
        set(&mut target.name, &self.name);
        set(&mut target.data_type, &self.data_type);
        self.length.merge(&mut target.length);
        self.significant_digits
            .merge(&mut target.significant_digits);
        self.display_format.merge(&mut target.display_format);
        set(&mut target.descriptions, &self.descriptions);
        self.code_list_oid.merge(&mut target.code_list_oid);
        self.comment_oid.merge(&mut target.comment_oid);
        set(&mut target.origins, &self.origins);
    }
}

// ============================================================================
// Code lists
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeListUpdate {
    pub name: Option<String>,
    pub kind: Option<CodeListKind>,
    pub data_type: Option<DataType>,
    #[serde(skip_serializing_if = "Field::is_keep")]
    pub external: Field<ExternalCodeList>,
    #[serde(skip_serializing_if = "Field::is_keep")]
    pub alias: Field<Alias>,
    #[serde(skip_serializing_if = "Field::is_keep")]
    pub standard_oid: Field<Oid>,
    #[serde(skip_serializing_if = "Field::is_keep")]
    pub comment_oid: Field<Oid>,
}

impl Patch<CodeList> for CodeListUpdate {
    const KIND: OidKind = OidKind::CodeList;

    fn validate(&self) -> Result<()> {
        require_text(Self::KIND, "name", self.name.as_ref())?;
        if self.kind == Some(CodeListKind::External) && matches!(self.external, Field::Clear) {
            return Err(ModelError::InvalidUpdate {
                kind: Self::KIND,
                field: "external",
                reason: "is required for external code lists",
            });
        }
        Ok(())
    }

    fn merge_into(&self, target: &mut CodeList) {
        set(&mut target.name, &self.name);
        set(&mut target.kind, &self.kind);
        set(&mut target.data_type, &self.data_type);
        self.external.merge(&mut target.external);
        self.alias.merge(&mut target.alias);
        self.standard_oid.merge(&mut target.standard_oid);
        self.comment_oid.merge(&mut target.comment_oid);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeListItemUpdate {
    pub coded_value: Option<String>,
    pub decode: Option<Vec<TranslatedText>>,
    pub extended_value: Option<bool>,
    #[serde(skip_serializing_if = "Field::is_keep")]
    pub rank: Field<u32>,
    #[serde(skip_serializing_if = "Field::is_keep")]
    pub alias: Field<Alias>,
}

impl Patch<CodeListItem> for CodeListItemUpdate {
    const KIND: OidKind = OidKind::CodeListItem;

    fn validate(&self) -> Result<()> {
        require_text(Self::KIND, "coded_value", self.coded_value.as_ref())
    }

    fn merge_into(&self, target: &mut CodeListItem) {
        set(&mut target.coded_value, &self.coded_value);
        set(&mut target.decode, &self.decode);
        set(&mut target.extended_value, &self.extended_value);
        self.rank.merge(&mut target.rank);
        self.alias.merge(&mut target.alias);
    }
}

// ============================================================================
// Annotations and leafs
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentUpdate {
    pub descriptions: Option<Vec<TranslatedText>>,
    pub documents: Option<Vec<DocumentRef>>,
}

impl Patch<Comment> for CommentUpdate {
    const KIND: OidKind = OidKind::Comment;

    fn merge_into(&self, target: &mut Comment) {
        set(&mut target.descriptions, &self.descriptions);
        set(&mut target.documents, &self.documents);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MethodUpdate {
    pub name: Option<String>,
    pub auto_method_name: Option<bool>,
    pub kind: Option<MethodKind>,
    pub descriptions: Option<Vec<TranslatedText>>,
    pub documents: Option<Vec<DocumentRef>>,
    pub formal_expressions: Option<Vec<FormalExpression>>,
}

impl Patch<Method> for MethodUpdate {
    const KIND: OidKind = OidKind::Method;

    fn validate(&self) -> Result<()> {
        require_text(Self::KIND, "name", self.name.as_ref())
    }

    fn merge_into(&self, target: &mut Method) {
        set(&mut target.name, &self.name);
        set(&mut target.auto_method_name, &self.auto_method_name);
        set(&mut target.kind, &self.kind);
        set(&mut target.descriptions, &self.descriptions);
        set(&mut target.documents, &self.documents);
        set(&mut target.formal_expressions, &self.formal_expressions);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeafUpdate {
    pub kind: Option<LeafKind>,
    pub title: Option<String>,
    pub href: Option<String>,
    #[serde(skip_serializing_if = "Field::is_keep")]
    pub base_folder: Field<String>,
}

impl Patch<Leaf> for LeafUpdate {
    const KIND: OidKind = OidKind::Leaf;

    fn validate(&self) -> Result<()> {
        require_text(Self::KIND, "title", self.title.as_ref())?;
        require_text(Self::KIND, "href", self.href.as_ref())
    }

    fn merge_into(&self, target: &mut Leaf) {
        set(&mut target.kind, &self.kind);
        set(&mut target.title, &self.title);
        set(&mut target.href, &self.href);
        self.base_folder.merge(&mut target.base_folder);
    }
}

// ============================================================================
// Standards
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StandardUpdate {
    pub name: Option<String>,
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Field::is_keep")]
    pub publishing_set: Field<String>,
    #[serde(skip_serializing_if = "Field::is_keep")]
    pub status: Field<String>,
    #[serde(skip_serializing_if = "Field::is_keep")]
    pub comment_oid: Field<Oid>,
    pub is_default: Option<bool>,
}

impl Patch<Standard> for StandardUpdate {
    const KIND: OidKind = OidKind::Standard;

    fn validate(&self) -> Result<()> {
        require_text(Self::KIND, "name", self.name.as_ref())?;
        require_text(Self::KIND, "version", self.version.as_ref())
    }

    fn merge_into(&self, target: &mut Standard) {
        set(&mut target.name, &self.name);
        set(&mut target.version, &self.version);
        self.publishing_set.merge(&mut target.publishing_set);
        self.status.merge(&mut target.status);
        self.comment_oid.merge(&mut target.comment_oid);
        set(&mut target.is_default, &self.is_default);
    }
}

// ============================================================================
// Analysis results
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultDisplayUpdate {
    pub name: Option<String>,
    pub descriptions: Option<Vec<TranslatedText>>,
    pub documents: Option<Vec<DocumentRef>>,
}

impl Patch<ResultDisplay> for ResultDisplayUpdate {
    const KIND: OidKind = OidKind::ResultDisplay;

    fn validate(&self) -> Result<()> {
        require_text(Self::KIND, "name", self.name.as_ref())
    }

    fn merge_into(&self, target: &mut ResultDisplay) {
        set(&mut target.name, &self.name);
        set(&mut target.descriptions, &self.descriptions);
        set(&mut target.documents, &self.documents);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResultUpdate {
    pub descriptions: Option<Vec<TranslatedText>>,
    #[serde(skip_serializing_if = "Field::is_keep")]
    pub reason: Field<String>,
    #[serde(skip_serializing_if = "Field::is_keep")]
    pub purpose: Field<String>,
    #[serde(skip_serializing_if = "Field::is_keep")]
    pub parameter_oid: Field<Oid>,
    pub analysis_dataset_oids: Option<Vec<Oid>>,
    pub documents: Option<Vec<DocumentRef>>,
    #[serde(skip_serializing_if = "Field::is_keep")]
    pub comment_oid: Field<Oid>,
}

impl Patch<AnalysisResult> for AnalysisResultUpdate {
    const KIND: OidKind = OidKind::AnalysisResult;

    fn merge_into(&self, target: &mut AnalysisResult) {
        set(&mut target.descriptions, &self.descriptions);
        self.reason.merge(&mut target.reason);
        self.purpose.merge(&mut target.purpose);
        self.parameter_oid.merge(&mut target.parameter_oid);
        set(&mut target.analysis_dataset_oids, &self.analysis_dataset_oids);
        set(&mut target.documents, &self.documents);
        self.comment_oid.merge(&mut target.comment_oid);
    }
}
