//! Entity reducers.
//!
//! One reducer per collection. Each receives the composer's working copy of
//! its own slice and the dispatched action, handles the variants that touch
//! that slice and passes every other variant through untouched.

pub mod code_lists;
pub mod comments;
pub mod item_defs;
pub mod item_groups;
pub mod leafs;
pub mod methods;
pub mod order;
pub mod result_displays;
pub mod standards;
pub mod study;
pub mod terminology;

use std::collections::BTreeMap;

use define_model::{Entity, ModelError, Oid, Patch};

use crate::action::{BulkReplace, CommentAction, CommentTarget};
use crate::error::{Result, StoreError};

pub(crate) fn unknown<T: Entity>(oid: &Oid) -> StoreError {
    StoreError::UnknownOid {
        kind: T::KIND,
        oid: oid.clone(),
    }
}

pub(crate) fn get_mut<'a, T: Entity>(
    map: &'a mut BTreeMap<Oid, T>,
    oid: &Oid,
) -> Result<&'a mut T> {
    map.get_mut(oid).ok_or_else(|| unknown::<T>(oid))
}

/// Target and new value of a comment attachment change, if `action` is one.
pub(crate) fn comment_change(action: &CommentAction) -> Option<(&CommentTarget, Option<&Oid>)> {
    match action {
        CommentAction::Add {
            comment,
            target: Some(target),
        } => Some((target, Some(&comment.oid))),
        CommentAction::Attach { oid, target } => Some((target, Some(oid))),
        CommentAction::Detach { target } => Some((target, None)),
        _ => None,
    }
}

/// Insert a new entity; its identifier must be free.
pub(crate) fn insert<T: Entity + Clone>(map: &mut BTreeMap<Oid, T>, entity: &T) -> Result<()> {
    if map.contains_key(entity.oid()) {
        return Err(StoreError::DuplicateOid {
            kind: T::KIND,
            oid: entity.oid().clone(),
        });
    }
    map.insert(entity.oid().clone(), entity.clone());
    Ok(())
}

/// Replace an entity with a validated, merged copy.
pub(crate) fn update<T, P>(map: &mut BTreeMap<Oid, T>, oid: &Oid, patch: &P) -> Result<()>
where
    T: Entity + Clone,
    P: Patch<T>,
{
    let current = map.get(oid).ok_or_else(|| unknown::<T>(oid))?;
    let merged = patch.apply_to(current)?;
    map.insert(oid.clone(), merged);
    Ok(())
}

/// Remove entities; absent identifiers are skipped.
pub(crate) fn delete<T>(map: &mut BTreeMap<Oid, T>, oids: &[Oid]) {
    for oid in oids {
        map.remove(oid);
    }
}

/// Removals first, then additions.
pub(crate) fn replace<T: Entity + Clone>(
    map: &mut BTreeMap<Oid, T>,
    bulk: &BulkReplace<T>,
) -> Result<()> {
    delete(map, &bulk.removed);
    for entity in &bulk.added {
        insert(map, entity)?;
    }
    Ok(())
}

/// Rearrange an owned sequence to follow `sequence`, which must name every
/// entry exactly once.
pub(crate) fn reorder<T: Entity + Clone>(
    items: &mut Vec<T>,
    sequence: &[Oid],
    collection: &'static str,
) -> Result<()> {
    let invalid = || StoreError::Model(ModelError::InvalidReorder { collection });
    if sequence.len() != items.len() {
        return Err(invalid());
    }
    let mut reordered: Vec<T> = Vec::with_capacity(items.len());
    for oid in sequence {
        if reordered.iter().any(|r| r.oid() == oid) {
            return Err(invalid());
        }
        let item = items.iter().find(|i| i.oid() == oid).ok_or_else(invalid)?;
        reordered.push(item.clone());
    }
    *items = reordered;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use define_model::{Comment, CommentUpdate, OidKind, TranslatedText};

    fn oid(value: &str) -> Oid {
        Oid::new(value).unwrap()
    }

    fn comments(values: &[&str]) -> BTreeMap<Oid, Comment> {
        values
            .iter()
            .map(|v| (oid(v), Comment::new(oid(v), *v)))
            .collect()
    }

    #[test]
    fn update_of_unknown_oid_fails() {
        let mut map = comments(&["COM.1"]);
        let err = update(&mut map, &oid("COM.9"), &CommentUpdate::default()).unwrap_err();
        assert_eq!(
            err,
            StoreError::UnknownOid {
                kind: OidKind::Comment,
                oid: oid("COM.9"),
            }
        );
    }

    #[test]
    fn update_replaces_with_merged_copy() {
        let mut map = comments(&["COM.1"]);
        let patch = CommentUpdate {
            descriptions: Some(vec![TranslatedText::new("changed")]),
            ..CommentUpdate::default()
        };
        update(&mut map, &oid("COM.1"), &patch).unwrap();
        assert_eq!(map[&oid("COM.1")].descriptions[0].value, "changed");
    }

    #[test]
    fn replace_removes_before_adding() {
        let mut map = comments(&["COM.1", "COM.2"]);
        let bulk = BulkReplace {
            removed: vec![oid("COM.1")],
            added: vec![Comment::new(oid("COM.1"), "new"), Comment::new(oid("COM.3"), "x")],
        };
        replace(&mut map, &bulk).unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map[&oid("COM.1")].descriptions[0].value, "new");
    }

    #[test]
    fn add_of_existing_oid_fails() {
        let mut map = comments(&["COM.1"]);
        let err = insert(&mut map, &Comment::new(oid("COM.1"), "again")).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateOid { .. }));
    }
}
