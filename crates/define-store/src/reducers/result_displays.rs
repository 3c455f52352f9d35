//! Result displays and the analysis results they list.

use std::collections::BTreeMap;

use define_model::{AnalysisResult, Oid, ResultDisplay};

use super::{comment_change, delete, get_mut, insert, update};
use crate::action::{Action, CommentTarget, ResultDisplayAction};
use crate::error::Result;

pub fn reduce(
    displays: &mut BTreeMap<Oid, ResultDisplay>,
    results: &mut BTreeMap<Oid, AnalysisResult>,
    action: &Action,
) -> Result<()> {
    match action {
        Action::ResultDisplay(action) => reduce_display(displays, results, action),
        Action::Comment(action) => {
            if let Some((CommentTarget::AnalysisResult(oid), comment)) = comment_change(action) {
                get_mut(results, oid)?.comment_oid = comment.cloned();
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

fn list_result(display: &mut ResultDisplay, oid: &Oid) {
    if !display.analysis_result_oids.contains(oid) {
        display.analysis_result_oids.push(oid.clone());
    }
}

fn reduce_display(
    displays: &mut BTreeMap<Oid, ResultDisplay>,
    results: &mut BTreeMap<Oid, AnalysisResult>,
    action: &ResultDisplayAction,
) -> Result<()> {
    match action {
        ResultDisplayAction::Add {
            display,
            results: added,
        } => {
            let mut display = display.clone();
            for result in added {
                insert(results, result)?;
                list_result(&mut display, &result.oid);
            }
            insert(displays, &display)
        }
        ResultDisplayAction::Update { oid, update: patch } => update(displays, oid, patch),
        ResultDisplayAction::Delete { oids } => {
            delete(displays, oids);
            Ok(())
        }
        ResultDisplayAction::AddResult {
            display_oid,
            result,
        } => {
            let display = get_mut(displays, display_oid)?;
            insert(results, result)?;
            list_result(display, &result.oid);
            Ok(())
        }
        ResultDisplayAction::UpdateResult { oid, update: patch } => update(results, oid, patch),
        ResultDisplayAction::RemoveResults { display_oid, oids } => {
            get_mut(displays, display_oid)?
                .analysis_result_oids
                .retain(|oid| !oids.contains(oid));
            Ok(())
        }
    }
}
