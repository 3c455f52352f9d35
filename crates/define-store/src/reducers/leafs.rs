use std::collections::BTreeMap;

use define_model::{Leaf, Oid};

use super::{delete, insert, replace, update};
use crate::action::{Action, LeafAction};
use crate::error::Result;

pub fn reduce(leafs: &mut BTreeMap<Oid, Leaf>, action: &Action) -> Result<()> {
    let Action::Leaf(action) = action else {
        return Ok(());
    };
    match action {
        LeafAction::Add { leaf } => insert(leafs, leaf)?,
        LeafAction::Update { oid, update: patch } => update(leafs, oid, patch)?,
        LeafAction::Delete { oids } => delete(leafs, oids),
        LeafAction::Replace(bulk) => replace(leafs, bulk)?,
    }
    Ok(())
}
