//! Item definitions.
//!
//! Item definitions are created together with the item group or item
//! reference that uses them. A definition shared between datasets may be
//! supplied again as long as it is identical to the stored one.

use std::collections::BTreeMap;

use define_model::{ItemDef, Oid, OidKind};

use super::{comment_change, get_mut, update};
use crate::action::{Action, CommentAction, CommentTarget, ItemDefAction, ItemGroupAction};
use crate::error::{Result, StoreError};

pub fn reduce(defs: &mut BTreeMap<Oid, ItemDef>, action: &Action) -> Result<()> {
    match action {
        Action::ItemGroup(ItemGroupAction::Add { item_defs, .. }) => {
            for def in item_defs {
                insert_shared(defs, def)?;
            }
            Ok(())
        }
        Action::ItemGroup(ItemGroupAction::AddItemRef {
            item_def: Some(def),
            ..
        }) => insert_shared(defs, def),
        Action::ItemDef(ItemDefAction::Update { oid, update: patch }) => update(defs, oid, patch),
        Action::Comment(action) => attach_comment(defs, action),
        _ => Ok(()),
    }
}

fn insert_shared(defs: &mut BTreeMap<Oid, ItemDef>, def: &ItemDef) -> Result<()> {
    match defs.get(&def.oid) {
        Some(existing) if existing == def => Ok(()),
        Some(_) => Err(StoreError::DuplicateOid {
            kind: OidKind::ItemDef,
            oid: def.oid.clone(),
        }),
        None => {
            defs.insert(def.oid.clone(), def.clone());
            Ok(())
        }
    }
}

fn attach_comment(defs: &mut BTreeMap<Oid, ItemDef>, action: &CommentAction) -> Result<()> {
    if let Some((CommentTarget::ItemDef(oid), comment)) = comment_change(action) {
        get_mut(defs, oid)?.comment_oid = comment.cloned();
    }
    Ok(())
}
