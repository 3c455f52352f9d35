use std::collections::BTreeMap;

use define_model::{Method, Oid};

use super::{delete, insert, replace, update};
use crate::action::{Action, MethodAction};
use crate::error::Result;

pub fn reduce(methods: &mut BTreeMap<Oid, Method>, action: &Action) -> Result<()> {
    let Action::Method(action) = action else {
        return Ok(());
    };
    match action {
        MethodAction::Add { method, .. } => insert(methods, method)?,
        MethodAction::Update { oid, update: patch } => update(methods, oid, patch)?,
        MethodAction::Delete { oids } => delete(methods, oids),
        MethodAction::Replace(bulk) => replace(methods, bulk)?,
        MethodAction::Attach { .. } | MethodAction::Detach { .. } => {}
    }
    Ok(())
}
