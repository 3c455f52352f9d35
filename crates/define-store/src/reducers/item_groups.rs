//! Item groups and their item references.

use std::collections::BTreeMap;

use define_model::{ItemGroup, ItemRef, Oid, OidKind, Patch};

use super::{comment_change, delete, get_mut, insert, reorder, update};
use crate::action::{
    Action, CommentAction, CommentTarget, ItemGroupAction, MethodAction, MethodTarget,
};
use crate::error::{Result, StoreError};

pub fn reduce(groups: &mut BTreeMap<Oid, ItemGroup>, action: &Action) -> Result<()> {
    match action {
        Action::ItemGroup(action) => reduce_item_group(groups, action),
        Action::Comment(action) => attach_comment(groups, action),
        Action::Method(action) => attach_method(groups, action),
        _ => Ok(()),
    }
}

fn reduce_item_group(
    groups: &mut BTreeMap<Oid, ItemGroup>,
    action: &ItemGroupAction,
) -> Result<()> {
    match action {
        ItemGroupAction::Add { item_group, .. } => insert(groups, item_group.as_ref()),
        ItemGroupAction::Update { oid, update: patch } => update(groups, oid, patch),
        ItemGroupAction::Delete { oids } => {
            delete(groups, oids);
            Ok(())
        }
        ItemGroupAction::AddItemRef {
            item_group_oid,
            item_ref,
            ..
        } => {
            let group = get_mut(groups, item_group_oid)?;
            if group.item_ref(&item_ref.oid).is_some() {
                return Err(StoreError::DuplicateOid {
                    kind: OidKind::ItemRef,
                    oid: item_ref.oid.clone(),
                });
            }
            group.item_refs.push(item_ref.clone());
            Ok(())
        }
        ItemGroupAction::UpdateItemRef {
            item_group_oid,
            oid,
            update: patch,
        } => {
            let group = get_mut(groups, item_group_oid)?;
            let slot = item_ref_mut(group, oid)?;
            *slot = patch.apply_to(slot)?;
            Ok(())
        }
        ItemGroupAction::DeleteItemRefs {
            item_group_oid,
            oids,
        } => {
            let group = get_mut(groups, item_group_oid)?;
            group.item_refs.retain(|r| !oids.contains(&r.oid));
            Ok(())
        }
        ItemGroupAction::ReorderItemRefs {
            item_group_oid,
            sequence,
        } => {
            let group = get_mut(groups, item_group_oid)?;
            reorder(&mut group.item_refs, sequence, "item references")
        }
    }
}

fn item_ref_mut<'a>(group: &'a mut ItemGroup, oid: &Oid) -> Result<&'a mut ItemRef> {
    group
        .item_ref_mut(oid)
        .ok_or_else(|| super::unknown::<ItemRef>(oid))
}

fn attach_comment(groups: &mut BTreeMap<Oid, ItemGroup>, action: &CommentAction) -> Result<()> {
    if let Some((CommentTarget::ItemGroup(oid), comment)) = comment_change(action) {
        get_mut(groups, oid)?.comment_oid = comment.cloned();
    }
    Ok(())
}

fn set_method(
    groups: &mut BTreeMap<Oid, ItemGroup>,
    target: &MethodTarget,
    method: Option<&Oid>,
) -> Result<()> {
    let group = get_mut(groups, &target.item_group_oid)?;
    item_ref_mut(group, &target.item_ref_oid)?.method_oid = method.cloned();
    Ok(())
}

fn attach_method(groups: &mut BTreeMap<Oid, ItemGroup>, action: &MethodAction) -> Result<()> {
    match action {
        MethodAction::Add {
            method,
            target: Some(target),
        } => set_method(groups, target, Some(&method.oid)),
        MethodAction::Attach { oid, target } => set_method(groups, target, Some(oid)),
        MethodAction::Detach { target } => set_method(groups, target, None),
        _ => Ok(()),
    }
}
