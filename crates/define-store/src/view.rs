//! Transient UI state.
//!
//! View state lives next to the history, never inside a frame: changing tab
//! or scrolling does not create an undo step, and undo never moves the view.

use define_model::{Document, Oid};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Standards,
    Datasets,
    Variables,
    CodeLists,
    Methods,
    Comments,
    Documents,
    ResultDisplays,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub tab: Tab,
    pub scroll_offset: u32,
    /// Identifier of the open modal dialog, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_item_group: Option<Oid>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ViewAction {
    SelectTab { tab: Tab },
    SetScroll { offset: u32 },
    OpenModal { modal: String },
    CloseModal,
    SelectItemGroup { oid: Option<Oid> },
}

impl ViewState {
    /// Apply a view action. Returns whether anything changed.
    pub fn apply(&mut self, action: &ViewAction) -> bool {
        let before = self.clone();
        match action {
            ViewAction::SelectTab { tab } => {
                if self.tab != *tab {
                    self.tab = *tab;
                    self.scroll_offset = 0;
                }
            }
            ViewAction::SetScroll { offset } => self.scroll_offset = *offset,
            ViewAction::OpenModal { modal } => self.modal = Some(modal.clone()),
            ViewAction::CloseModal => self.modal = None,
            ViewAction::SelectItemGroup { oid } => self.selected_item_group.clone_from(oid),
        }
        *self != before
    }

    /// Drop selections that no longer resolve in `document`.
    pub fn retain_valid(&mut self, document: &Document) {
        if let Some(oid) = &self.selected_item_group
            && !document.mdv().item_groups.contains_key(oid)
        {
            self.selected_item_group = None;
        }
    }
}
