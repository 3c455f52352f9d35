use std::collections::BTreeMap;

use define_model::{Oid, Standard};

use super::{comment_change, delete, get_mut, insert, replace, update};
use crate::action::{Action, CommentTarget, StandardAction};
use crate::error::Result;

pub fn reduce(standards: &mut BTreeMap<Oid, Standard>, action: &Action) -> Result<()> {
    match action {
        Action::Standard(StandardAction::Add { standard }) => insert(standards, standard),
        Action::Standard(StandardAction::Update { oid, update: patch }) => {
            update(standards, oid, patch)
        }
        Action::Standard(StandardAction::Delete { oids }) => {
            delete(standards, oids);
            Ok(())
        }
        Action::Standard(StandardAction::Replace(bulk)) => replace(standards, bulk),
        Action::Comment(action) => {
            if let Some((CommentTarget::Standard(oid), comment)) = comment_change(action) {
                get_mut(standards, oid)?.comment_oid = comment.cloned();
            }
            Ok(())
        }
        _ => Ok(()),
    }
}
