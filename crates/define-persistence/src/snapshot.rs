//! Session snapshot projection.

use chrono::{DateTime, Utc};
use define_model::{Document, Oid};
use define_store::{EditorContext, ViewState};
use serde::{Deserialize, Serialize};

use crate::error::{PersistenceError, Result};
use crate::io::document_fingerprint;

/// Current session file schema version.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Where the cursor was in the undo history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryPosition {
    pub frames: usize,
    pub cursor: usize,
}

/// A loaded controlled-terminology package, by reference only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminologyRef {
    pub oid: Oid,
    pub label: String,
    pub version: String,
}

/// Reduced, serializable view of an editing session.
///
/// Holds no document content and no constant tables: only what is needed
/// to recognise the document again and restore the editor around it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub schema_version: u32,
    pub saved_at: DateTime<Utc>,
    pub study_oid: Oid,
    pub study_name: String,
    /// SHA-256 of the present frame.
    pub fingerprint: String,
    pub history: HistoryPosition,
    pub view: ViewState,
    #[serde(default)]
    pub terminology: Vec<TerminologyRef>,
}

impl SessionSnapshot {
    /// Project the present state of `ctx`.
    pub fn project(ctx: &EditorContext) -> Result<Self> {
        let document = ctx.document();
        let history = ctx.history();
        Ok(Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            saved_at: Utc::now(),
            study_oid: document.study.oid.clone(),
            study_name: document.study.global_variables.study_name.clone(),
            fingerprint: document_fingerprint(document)?,
            history: HistoryPosition {
                frames: history.len(),
                cursor: history.cursor(),
            },
            view: ctx.view().clone(),
            terminology: document
                .terminology
                .values()
                .map(|package| TerminologyRef {
                    oid: package.oid.clone(),
                    label: package.label.clone(),
                    version: package.version.clone(),
                })
                .collect(),
        })
    }

    /// Whether two snapshots describe the same session state. The save
    /// timestamp is not compared.
    pub fn same_state(&self, other: &Self) -> bool {
        self.study_oid == other.study_oid
            && self.study_name == other.study_name
            && self.fingerprint == other.fingerprint
            && self.history == other.history
            && self.view == other.view
            && self.terminology == other.terminology
    }

    /// Check that `document` is the one this session was taken from.
    pub fn verify_document(&self, document: &Document) -> Result<()> {
        let actual = document_fingerprint(document)?;
        if actual == self.fingerprint {
            Ok(())
        } else {
            Err(PersistenceError::FingerprintMismatch {
                expected: self.fingerprint.clone(),
                actual,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use define_model::{Standard, StandardKind, TerminologyPackage};
    use define_store::{Action, StoreConfig, Tab, ViewAction};

    fn oid(value: &str) -> Oid {
        Oid::new(value).unwrap()
    }

    fn context() -> EditorContext {
        let mut document = Document::new(oid("ST.TEST"), oid("MDV.TEST"), "TEST");
        let standard = Standard::new(
            oid("STD.CT"),
            "CDISC/NCI",
            StandardKind::ControlledTerminology,
            "2024-03-29",
        );
        document.mdv_mut().order.standards.add([&standard.oid]);
        document.mdv_mut().standards.insert(standard.oid.clone(), standard);
        document.terminology.insert(
            oid("STD.CT"),
            TerminologyPackage::new(oid("STD.CT"), "SDTM CT", "2024-03-29"),
        );
        EditorContext::open(document, StoreConfig::default()).unwrap()
    }

    #[test]
    fn projection_excludes_content() {
        let ctx = context();
        let snapshot = SessionSnapshot::project(&ctx).unwrap();
        assert_eq!(snapshot.study_name, "TEST");
        assert_eq!(snapshot.history, HistoryPosition { frames: 1, cursor: 0 });
        assert_eq!(snapshot.terminology[0].version, "2024-03-29");
        assert_eq!(snapshot.fingerprint.len(), 64);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert!(json.get("study").is_none());
        assert!(json["terminology"][0].get("code_lists").is_none());
    }

    #[test]
    fn view_change_is_a_state_change() {
        let mut ctx = context();
        let before = SessionSnapshot::project(&ctx).unwrap();
        let again = SessionSnapshot::project(&ctx).unwrap();
        assert!(before.same_state(&again));

        ctx.dispatch(Action::View(ViewAction::SelectTab { tab: Tab::CodeLists }))
            .unwrap();
        let after = SessionSnapshot::project(&ctx).unwrap();
        assert!(!before.same_state(&after));
        assert_eq!(before.fingerprint, after.fingerprint);
    }

    #[test]
    fn changed_document_fails_verification() {
        let ctx = context();
        let snapshot = SessionSnapshot::project(&ctx).unwrap();
        assert!(snapshot.verify_document(ctx.document()).is_ok());

        let mut edited = ctx.document().as_ref().clone();
        edited.study.global_variables.study_name = "OTHER".to_string();
        assert!(matches!(
            snapshot.verify_document(&edited),
            Err(PersistenceError::FingerprintMismatch { .. })
        ));
    }
}
