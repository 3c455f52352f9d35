//! Data model of a Define-XML document.
//!
//! Entities live in normalized maps keyed by [`Oid`] under the
//! [`MetadataVersion`]; ordered collections additionally carry an
//! [`OrderStore`] with their display sequence.

pub mod analysis;
pub mod annotation;
pub mod code_list;
pub mod constants;
pub mod document;
pub mod error;
pub mod ids;
pub mod item_def;
pub mod item_group;
pub mod leaf;
pub mod order;
pub mod standard;
pub mod terminology;
pub mod text;
pub mod update;

pub use analysis::{AnalysisResult, ResultDisplay};
pub use annotation::{Comment, FormalExpression, Method, MethodKind};
pub use code_list::{Alias, CodeList, CodeListItem, CodeListItems, CodeListKind, ExternalCodeList};
pub use constants::StdConstants;
pub use document::{
    DEFAULT_DEFINE_VERSION, Document, GlobalVariables, MetadataVersion, Order, Study,
};
pub use error::{ModelError, Result};
pub use ids::{Entity, Oid, OidKind};
pub use item_def::{DataType, ItemDef, Origin, OriginKind};
pub use item_group::{ItemGroup, ItemRef};
pub use leaf::{DocumentRef, Leaf, LeafKind, PageRefKind, PdfPageRef};
pub use order::{OrderMismatch, OrderStore};
pub use standard::{Standard, StandardKind};
pub use terminology::{Term, TerminologyCodeList, TerminologyPackage};
pub use text::{TranslatedText, first_text};
pub use update::{
    AnalysisResultUpdate, CodeListItemUpdate, CodeListUpdate, CommentUpdate, Field,
    GlobalVariablesUpdate, ItemDefUpdate, ItemGroupUpdate, ItemRefUpdate, LeafUpdate,
    MetadataVersionUpdate, MethodUpdate, Patch, ResultDisplayUpdate, StandardUpdate,
};
