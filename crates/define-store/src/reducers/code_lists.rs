//! Code lists and their items.

use std::collections::BTreeMap;

use define_model::{CodeList, CodeListItem, ModelError, Oid, OidKind, Patch};

use super::{comment_change, delete, get_mut, insert, replace, update};
use crate::action::{Action, CodeListAction, CommentAction, CommentTarget};
use crate::error::{Result, StoreError};

pub fn reduce(lists: &mut BTreeMap<Oid, CodeList>, action: &Action) -> Result<()> {
    match action {
        Action::CodeList(action) => reduce_code_list(lists, action),
        Action::Comment(action) => attach_comment(lists, action),
        _ => Ok(()),
    }
}

fn reduce_code_list(lists: &mut BTreeMap<Oid, CodeList>, action: &CodeListAction) -> Result<()> {
    match action {
        CodeListAction::Add { code_list } => insert(lists, code_list.as_ref()),
        CodeListAction::Update { oid, update: patch } => update(lists, oid, patch),
        CodeListAction::Delete { oids } => {
            delete(lists, oids);
            Ok(())
        }
        CodeListAction::Replace(bulk) => replace(lists, bulk),
        CodeListAction::AddItems {
            code_list_oid,
            items,
        } => {
            let list = get_mut(lists, code_list_oid)?;
            for item in items {
                if !list.items.push(item.clone()) {
                    return Err(StoreError::DuplicateOid {
                        kind: OidKind::CodeListItem,
                        oid: item.oid.clone(),
                    });
                }
            }
            Ok(())
        }
        CodeListAction::UpdateItem {
            code_list_oid,
            oid,
            update: patch,
        } => {
            let list = get_mut(lists, code_list_oid)?;
            let item = list
                .items
                .get_mut(oid)
                .ok_or_else(|| super::unknown::<CodeListItem>(oid))?;
            *item = patch.apply_to(item)?;
            Ok(())
        }
        CodeListAction::DeleteItems {
            code_list_oid,
            oids,
        } => {
            get_mut(lists, code_list_oid)?.items.remove(oids);
            Ok(())
        }
        CodeListAction::ReorderItems {
            code_list_oid,
            sequence,
        } => {
            if get_mut(lists, code_list_oid)?.items.reorder(sequence) {
                Ok(())
            } else {
                Err(ModelError::InvalidReorder {
                    collection: "code list items",
                }
                .into())
            }
        }
        CodeListAction::SortItems { code_list_oid } => {
            get_mut(lists, code_list_oid)?
                .items
                .sort_by_key(|item| item.coded_value.clone());
            Ok(())
        }
    }
}

fn attach_comment(lists: &mut BTreeMap<Oid, CodeList>, action: &CommentAction) -> Result<()> {
    if let Some((CommentTarget::CodeList(oid), comment)) = comment_change(action) {
        get_mut(lists, oid)?.comment_oid = comment.cloned();
    }
    Ok(())
}
