//! Editor context.
//!
//! [`EditorContext`] is the single owner of the editing session: undo
//! history, view state, composer and identifier generator. Every change goes
//! through [`EditorContext::dispatch`].

use std::sync::Arc;

use define_model::{Document, Oid, OidKind, Order, StdConstants};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::action::{Action, ActionCategory};
use crate::compose::DocumentComposer;
use crate::error::{Result, StoreError};
use crate::history::{DEFAULT_HISTORY_LIMIT, History};
use crate::ids::{OidGenerator, UuidOidGenerator};
use crate::view::ViewState;

/// What happens when a composed frame fails the integrity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrityPolicy {
    /// Return the violation as an error.
    Strict,
    /// Log the violation and keep the present frame.
    Lenient,
}

impl Default for IntegrityPolicy {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::Strict
        } else {
            Self::Lenient
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub history_limit: usize,
    pub integrity: IntegrityPolicy,
    pub constants: StdConstants,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            integrity: IntegrityPolicy::default(),
            constants: StdConstants::default(),
        }
    }
}

/// Result of a dispatched action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A new frame was recorded (or history restarted on load).
    Applied,
    /// Only view state was touched.
    Transient,
    Undone,
    Redone,
    /// Nothing changed; no frame was recorded.
    Unchanged,
    /// The action failed under [`IntegrityPolicy::Lenient`]; the present
    /// frame is kept.
    Rejected(StoreError),
}

pub struct EditorContext {
    history: History,
    view: ViewState,
    composer: DocumentComposer,
    oid_generator: Box<dyn OidGenerator>,
    policy: IntegrityPolicy,
}

impl std::fmt::Debug for EditorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorContext")
            .field("frames", &self.history.len())
            .field("cursor", &self.history.cursor())
            .field("view", &self.view)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl EditorContext {
    /// Open `document` as frame zero. The document must pass the integrity
    /// check regardless of policy.
    pub fn open(document: Document, config: StoreConfig) -> Result<Self> {
        let composer = DocumentComposer::new(config.constants);
        let report = crate::integrity::verify(&document, composer.constants());
        if !report.is_empty() {
            return Err(StoreError::Integrity(report));
        }
        info!(
            study = %document.study.global_variables.study_name,
            item_groups = document.mdv().item_groups.len(),
            "opened document"
        );
        Ok(Self {
            history: History::new(document, config.history_limit),
            view: ViewState::default(),
            composer,
            oid_generator: Box::new(UuidOidGenerator),
            policy: config.integrity,
        })
    }

    pub fn with_oid_generator(mut self, generator: impl OidGenerator + 'static) -> Self {
        self.oid_generator = Box::new(generator);
        self
    }

    /// The present frame.
    pub fn document(&self) -> &Arc<Document> {
        self.history.present()
    }

    pub fn order(&self) -> &Order {
        &self.history.present().mdv().order
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn policy(&self) -> IntegrityPolicy {
        self.policy
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// A fresh identifier not used anywhere in the present frame.
    pub fn new_oid(&mut self, kind: OidKind) -> Oid {
        loop {
            let oid = self.oid_generator.generate(kind);
            if !self.document().contains_oid(&oid) {
                return oid;
            }
        }
    }

    #[allow(clippy::needless_pass_by_value)]
    pub fn dispatch(&mut self, action: Action) -> Result<DispatchOutcome> {
        debug!(action = action.name(), "dispatch");
        let outcome = match action.category() {
            ActionCategory::Transient => {
                if let Action::View(view_action) = &action {
                    self.view.apply(view_action);
                }
                DispatchOutcome::Transient
            }
            ActionCategory::History => self.move_cursor(&action),
            ActionCategory::Root | ActionCategory::Document => self.compose(&action)?,
        };
        self.view.retain_valid(self.history.present());
        Ok(outcome)
    }

    fn move_cursor(&mut self, action: &Action) -> DispatchOutcome {
        match action {
            Action::Undo if self.history.undo() => DispatchOutcome::Undone,
            Action::Redo if self.history.redo() => DispatchOutcome::Redone,
            _ => DispatchOutcome::Unchanged,
        }
    }

    fn compose(&mut self, action: &Action) -> Result<DispatchOutcome> {
        let present = Arc::clone(self.history.present());
        let next = match self.composer.compose(&present, action) {
            Ok(next) => next,
            Err(err) if self.policy == IntegrityPolicy::Lenient => {
                warn!(action = action.name(), error = %err, "rejected action");
                return Ok(DispatchOutcome::Rejected(err));
            }
            Err(err) => {
                if let StoreError::Integrity(report) = &err {
                    error!(action = action.name(), %report, "integrity violation");
                }
                return Err(err);
            }
        };

        if action.category() == ActionCategory::Root {
            info!(study = %next.study.global_variables.study_name, "loaded document");
            self.history.reset(next);
            return Ok(DispatchOutcome::Applied);
        }
        if next == *present {
            return Ok(DispatchOutcome::Unchanged);
        }
        self.history.push(next);
        Ok(DispatchOutcome::Applied)
    }
}
