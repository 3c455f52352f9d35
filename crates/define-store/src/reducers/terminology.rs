//! Loaded controlled-terminology packages.

use std::collections::BTreeMap;

use define_model::{Oid, TerminologyPackage};
use tracing::debug;

use super::{delete, replace};
use crate::action::{Action, TerminologyAction};
use crate::error::Result;

pub fn reduce(packages: &mut BTreeMap<Oid, TerminologyPackage>, action: &Action) -> Result<()> {
    let Action::Terminology(action) = action else {
        return Ok(());
    };
    match action {
        TerminologyAction::Load { package } => {
            debug!(package = %package.oid, version = %package.version, "loading terminology");
            packages.insert(package.oid.clone(), (**package).clone());
        }
        TerminologyAction::Unload { oids } => delete(packages, oids),
        TerminologyAction::Replace(bulk) => replace(packages, bulk)?,
    }
    Ok(())
}
