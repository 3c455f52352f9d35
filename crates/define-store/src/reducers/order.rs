//! Order stores.
//!
//! Runs after the content reducers so that every add, delete and bulk
//! replacement of an ordered collection is mirrored in its order store.

use define_model::{Entity, MetadataVersion, ModelError, Oid, OidKind, OrderStore, Standard};

use crate::action::{
    Action, BulkReplace, CodeListAction, ItemGroupAction, LeafAction, OrderAction, StandardAction,
};
use crate::error::Result;

pub fn reduce(mdv: &mut MetadataVersion, action: &Action) -> Result<()> {
    if let Action::Order(OrderAction::SortByName { kind }) = action {
        return sort_by_name(mdv, *kind);
    }
    let order = &mut mdv.order;
    match action {
        Action::ItemGroup(ItemGroupAction::Add { item_group, .. }) => {
            order.item_groups.add([&item_group.oid]);
        }
        Action::ItemGroup(ItemGroupAction::Delete { oids }) => order.item_groups.remove(oids),

        Action::CodeList(CodeListAction::Add { code_list }) => {
            order.code_lists.add([&code_list.oid]);
        }
        Action::CodeList(CodeListAction::Delete { oids }) => order.code_lists.remove(oids),
        Action::CodeList(CodeListAction::Replace(bulk)) => apply(&mut order.code_lists, bulk),

        Action::Standard(StandardAction::Add { standard }) => {
            order.standards.add([&standard.oid]);
        }
        Action::Standard(StandardAction::Delete { oids }) => order.standards.remove(oids),
        Action::Standard(StandardAction::Replace(bulk)) => apply(&mut order.standards, bulk),

        Action::Leaf(LeafAction::Add { leaf }) => order.leafs.add([&leaf.oid]),
        Action::Leaf(LeafAction::Delete { oids }) => order.leafs.remove(oids),
        Action::Leaf(LeafAction::Replace(bulk)) => apply(&mut order.leafs, bulk),

        Action::Order(OrderAction::Reorder { kind, sequence }) => {
            let store = order
                .store_mut(*kind)
                .ok_or(ModelError::InvalidReorder {
                    collection: kind.label(),
                })?;
            if !store.reorder(sequence.clone()) {
                return Err(ModelError::InvalidReorder {
                    collection: kind.label(),
                }
                .into());
            }
        }
        _ => {}
    }
    Ok(())
}

fn apply<T: Entity>(store: &mut OrderStore, bulk: &BulkReplace<T>) {
    store.apply(&bulk.removed, &bulk.added_oids());
}

/// Stable sort on the display name of each entry.
fn sort_by_name(mdv: &mut MetadataVersion, kind: OidKind) -> Result<()> {
    let MetadataVersion {
        order,
        item_groups,
        code_lists,
        leafs,
        standards,
        ..
    } = mdv;
    let label = |oid: &Oid, name: Option<String>| name.unwrap_or_else(|| oid.to_string());
    match kind {
        OidKind::ItemGroup => order
            .item_groups
            .sort_by_key(|oid| label(oid, item_groups.get(oid).map(|g| g.name.clone()))),
        OidKind::CodeList => order
            .code_lists
            .sort_by_key(|oid| label(oid, code_lists.get(oid).map(|c| c.name.clone()))),
        OidKind::Leaf => order
            .leafs
            .sort_by_key(|oid| label(oid, leafs.get(oid).map(|l| l.title.clone()))),
        OidKind::Standard => order
            .standards
            .sort_by_key(|oid| label(oid, standards.get(oid).map(Standard::label))),
        _ => {
            return Err(ModelError::InvalidReorder {
                collection: kind.label(),
            }
            .into());
        }
    }
    Ok(())
}
