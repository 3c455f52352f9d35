//! In-memory document store for Define documents.
//!
//! The store keeps one document as a linear history of immutable frames.
//! A change is an [`Action`] dispatched through [`EditorContext`]:
//!
//! 1. the action is classified ([`ActionCategory`]); view actions touch
//!    [`ViewState`] only and undo/redo move the history cursor
//! 2. document actions go to the [`DocumentComposer`], which threads the
//!    action through every reducer on a copy of the present frame
//! 3. references to removed entities are purged and orphans dropped
//! 4. the result is checked by [`integrity::verify`] and pushed as a frame
//!
//! # Example
//!
//! ```ignore
//! use define_store::{Action, EditorContext, StoreConfig};
//!
//! let mut ctx = EditorContext::open(document, StoreConfig::default())?;
//! let oid = ctx.new_oid(OidKind::Leaf);
//! ctx.dispatch(Action::Leaf(LeafAction::Add { leaf: Leaf { oid, .. } }))?;
//! ctx.dispatch(Action::Undo)?;
//! ```

pub mod action;
pub mod compare;
pub mod compose;
pub mod context;
pub mod error;
pub mod history;
pub mod ids;
pub mod integrity;
pub mod reconcile;
pub mod reducers;
pub mod references;
pub mod view;

pub use action::{
    Action, ActionCategory, BulkReplace, CodeListAction, CommentAction, CommentTarget,
    ItemDefAction, ItemGroupAction, LeafAction, MethodAction, MethodTarget, OrderAction,
    ResultDisplayAction, StandardAction, StudyAction, TerminologyAction,
};
pub use compare::{SemanticEq, is_equivalent};
pub use compose::DocumentComposer;
pub use context::{DispatchOutcome, EditorContext, IntegrityPolicy, StoreConfig};
pub use error::{Result, StoreError};
pub use history::{DEFAULT_HISTORY_LIMIT, History};
pub use ids::{OidGenerator, SequentialOidGenerator, UuidOidGenerator};
pub use integrity::{IntegrityIssue, IntegrityReport};
pub use reconcile::{Conflict, Reconciliation, Resolution, reconcile};
pub use references::References;
pub use view::{Tab, ViewAction, ViewState};
