use std::collections::BTreeMap;

use define_model::{Comment, Oid};

use super::{delete, insert, replace, update};
use crate::action::{Action, CommentAction};
use crate::error::Result;

pub fn reduce(comments: &mut BTreeMap<Oid, Comment>, action: &Action) -> Result<()> {
    let Action::Comment(action) = action else {
        return Ok(());
    };
    match action {
        CommentAction::Add { comment, .. } => insert(comments, comment)?,
        CommentAction::Update { oid, update: patch } => update(comments, oid, patch)?,
        CommentAction::Delete { oids } => delete(comments, oids),
        CommentAction::Replace(bulk) => replace(comments, bulk)?,
        // Attachment lives on the referencing entity.
        CommentAction::Attach { .. } | CommentAction::Detach { .. } => {}
    }
    Ok(())
}
