//! Actions: the only way to change a document.
//!
//! Every edit is one variant of [`Action`]. Actions serialize as
//! `{"type": ..., "payload": ...}` so that scripted edits and recorded
//! sessions can be replayed.

use define_model::{
    AnalysisResult, AnalysisResultUpdate, CodeList, CodeListItem, CodeListItemUpdate,
    CodeListUpdate, Comment, CommentUpdate, Document, GlobalVariablesUpdate, ItemDef,
    ItemDefUpdate, ItemGroup, ItemGroupUpdate, ItemRef, ItemRefUpdate, Leaf, LeafUpdate,
    MetadataVersionUpdate, Method, MethodUpdate, Oid, OidKind, ResultDisplay, ResultDisplayUpdate,
    Standard, StandardUpdate, TerminologyPackage,
};
use serde::{Deserialize, Serialize};

use crate::view::ViewAction;

/// How the editor context treats an action before composing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    /// Adopts a new document and resets history.
    Root,
    /// Produces a new document frame.
    Document,
    /// Touches view state only; never recorded.
    Transient,
    /// Moves the history cursor.
    History,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Action {
    /// Open a document. History restarts from it.
    Load(Box<Document>),
    /// Swap in a whole document as a new undoable step.
    Replace(Box<Document>),
    Study(StudyAction),
    ItemGroup(ItemGroupAction),
    ItemDef(ItemDefAction),
    CodeList(CodeListAction),
    Standard(StandardAction),
    Terminology(TerminologyAction),
    Comment(CommentAction),
    Method(MethodAction),
    Leaf(LeafAction),
    ResultDisplay(ResultDisplayAction),
    Order(OrderAction),
    View(ViewAction),
    Undo,
    Redo,
}

impl Action {
    pub fn category(&self) -> ActionCategory {
        match self {
            Self::Load(_) => ActionCategory::Root,
            Self::View(_) => ActionCategory::Transient,
            Self::Undo | Self::Redo => ActionCategory::History,
            Self::Replace(_)
            | Self::Study(_)
            | Self::ItemGroup(_)
            | Self::ItemDef(_)
            | Self::CodeList(_)
            | Self::Standard(_)
            | Self::Terminology(_)
            | Self::Comment(_)
            | Self::Method(_)
            | Self::Leaf(_)
            | Self::ResultDisplay(_)
            | Self::Order(_) => ActionCategory::Document,
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Load(_) => "load",
            Self::Replace(_) => "replace",
            Self::Study(_) => "study",
            Self::ItemGroup(_) => "item_group",
            Self::ItemDef(_) => "item_def",
            Self::CodeList(_) => "code_list",
            Self::Standard(_) => "standard",
            Self::Terminology(_) => "terminology",
            Self::Comment(_) => "comment",
            Self::Method(_) => "method",
            Self::Leaf(_) => "leaf",
            Self::ResultDisplay(_) => "result_display",
            Self::Order(_) => "order",
            Self::View(_) => "view",
            Self::Undo => "undo",
            Self::Redo => "redo",
        }
    }
}

/// Bulk replacement: `removed` identifiers are dropped before `added`
/// entities are inserted. An identifier in both sets is replaced in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkReplace<T> {
    #[serde(default)]
    pub removed: Vec<Oid>,
    #[serde(default = "Vec::new")]
    pub added: Vec<T>,
}

impl<T> Default for BulkReplace<T> {
    fn default() -> Self {
        Self {
            removed: Vec::new(),
            added: Vec::new(),
        }
    }
}

impl<T: define_model::Entity> BulkReplace<T> {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty()
    }

    pub fn added_oids(&self) -> Vec<Oid> {
        self.added.iter().map(|e| e.oid().clone()).collect()
    }
}

// ============================================================================
// Per-collection actions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum StudyAction {
    UpdateGlobalVariables { update: GlobalVariablesUpdate },
    UpdateMetadataVersion { update: MetadataVersionUpdate },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ItemGroupAction {
    /// Add a dataset together with the item definitions its references use.
    Add {
        item_group: Box<ItemGroup>,
        #[serde(default)]
        item_defs: Vec<ItemDef>,
    },
    Update {
        oid: Oid,
        update: ItemGroupUpdate,
    },
    Delete {
        oids: Vec<Oid>,
    },
    /// Add a variable: an item reference and, if new, its definition.
    AddItemRef {
        item_group_oid: Oid,
        item_ref: ItemRef,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        item_def: Option<ItemDef>,
    },
    UpdateItemRef {
        item_group_oid: Oid,
        oid: Oid,
        update: ItemRefUpdate,
    },
    DeleteItemRefs {
        item_group_oid: Oid,
        oids: Vec<Oid>,
    },
    ReorderItemRefs {
        item_group_oid: Oid,
        sequence: Vec<Oid>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ItemDefAction {
    Update { oid: Oid, update: ItemDefUpdate },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum CodeListAction {
    Add {
        code_list: Box<CodeList>,
    },
    Update {
        oid: Oid,
        update: CodeListUpdate,
    },
    Delete {
        oids: Vec<Oid>,
    },
    Replace(BulkReplace<CodeList>),
    AddItems {
        code_list_oid: Oid,
        items: Vec<CodeListItem>,
    },
    UpdateItem {
        code_list_oid: Oid,
        oid: Oid,
        update: CodeListItemUpdate,
    },
    DeleteItems {
        code_list_oid: Oid,
        oids: Vec<Oid>,
    },
    ReorderItems {
        code_list_oid: Oid,
        sequence: Vec<Oid>,
    },
    /// Sort items by coded value; ties keep their order.
    SortItems {
        code_list_oid: Oid,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum StandardAction {
    Add { standard: Standard },
    Update { oid: Oid, update: StandardUpdate },
    Delete { oids: Vec<Oid> },
    Replace(BulkReplace<Standard>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TerminologyAction {
    /// Load a package, replacing any package with the same identifier.
    Load { package: Box<TerminologyPackage> },
    Unload { oids: Vec<Oid> },
    Replace(BulkReplace<TerminologyPackage>),
}

/// Entity a comment is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "oid", rename_all = "snake_case")]
pub enum CommentTarget {
    ItemGroup(Oid),
    ItemDef(Oid),
    CodeList(Oid),
    Standard(Oid),
    AnalysisResult(Oid),
}

impl CommentTarget {
    pub fn kind(&self) -> OidKind {
        match self {
            Self::ItemGroup(_) => OidKind::ItemGroup,
            Self::ItemDef(_) => OidKind::ItemDef,
            Self::CodeList(_) => OidKind::CodeList,
            Self::Standard(_) => OidKind::Standard,
            Self::AnalysisResult(_) => OidKind::AnalysisResult,
        }
    }

    pub fn oid(&self) -> &Oid {
        match self {
            Self::ItemGroup(oid)
            | Self::ItemDef(oid)
            | Self::CodeList(oid)
            | Self::Standard(oid)
            | Self::AnalysisResult(oid) => oid,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum CommentAction {
    /// Add a comment, optionally attaching it in the same step.
    Add {
        comment: Comment,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<CommentTarget>,
    },
    Update {
        oid: Oid,
        update: CommentUpdate,
    },
    Delete {
        oids: Vec<Oid>,
    },
    Replace(BulkReplace<Comment>),
    Attach {
        oid: Oid,
        target: CommentTarget,
    },
    /// Clear the target's comment reference. A comment left without
    /// references is dropped by the composer.
    Detach {
        target: CommentTarget,
    },
}

/// Item reference a method is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodTarget {
    pub item_group_oid: Oid,
    pub item_ref_oid: Oid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum MethodAction {
    Add {
        method: Method,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<MethodTarget>,
    },
    Update {
        oid: Oid,
        update: MethodUpdate,
    },
    Delete {
        oids: Vec<Oid>,
    },
    Replace(BulkReplace<Method>),
    Attach {
        oid: Oid,
        target: MethodTarget,
    },
    Detach {
        target: MethodTarget,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum LeafAction {
    Add { leaf: Leaf },
    Update { oid: Oid, update: LeafUpdate },
    Delete { oids: Vec<Oid> },
    Replace(BulkReplace<Leaf>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ResultDisplayAction {
    Add {
        display: ResultDisplay,
        #[serde(default)]
        results: Vec<AnalysisResult>,
    },
    Update {
        oid: Oid,
        update: ResultDisplayUpdate,
    },
    Delete {
        oids: Vec<Oid>,
    },
    AddResult {
        display_oid: Oid,
        result: AnalysisResult,
    },
    UpdateResult {
        oid: Oid,
        update: AnalysisResultUpdate,
    },
    /// Remove results from a display; results no longer listed anywhere
    /// are dropped by the composer.
    RemoveResults {
        display_oid: Oid,
        oids: Vec<Oid>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum OrderAction {
    /// Replace the display order of an ordered collection. Must be a
    /// permutation of the current order.
    Reorder { kind: OidKind, sequence: Vec<Oid> },
    /// Stable alphabetical sort by the collection's display name.
    SortByName { kind: OidKind },
}
