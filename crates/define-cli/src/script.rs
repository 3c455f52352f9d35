//! Action scripts for `apply`.
//!
//! A script is a JSON array of actions in their serialized form:
//!
//! ```json
//! [
//!   { "type": "leaf", "payload": { "op": "delete", "oids": ["LF.ACRF"] } },
//!   { "type": "undo" }
//! ]
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use define_store::{Action, DispatchOutcome, EditorContext, StoreError};
use tracing::info;

/// Outcome of one dispatched step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    /// One-based position in the script.
    pub step: usize,
    pub action: &'static str,
    pub outcome: String,
}

impl StepReport {
    pub fn is_rejected(&self) -> bool {
        self.outcome.starts_with("rejected")
    }
}

pub fn parse_script(text: &str) -> serde_json::Result<Vec<Action>> {
    serde_json::from_str(text)
}

pub fn read_script(path: &Path) -> Result<Vec<Action>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    parse_script(&text).with_context(|| format!("invalid action script {}", path.display()))
}

pub fn describe(outcome: &DispatchOutcome) -> String {
    match outcome {
        DispatchOutcome::Applied => "applied".to_string(),
        DispatchOutcome::Transient => "view only".to_string(),
        DispatchOutcome::Undone => "undone".to_string(),
        DispatchOutcome::Redone => "redone".to_string(),
        DispatchOutcome::Unchanged => "unchanged".to_string(),
        DispatchOutcome::Rejected(StoreError::Integrity(report)) => format!("rejected: {report}"),
        DispatchOutcome::Rejected(err) => format!("rejected: {err}"),
    }
}

/// Dispatch every action in order. `after_step` sees the context after each
/// successful dispatch. Stops at the first error.
pub fn run_script(
    ctx: &mut EditorContext,
    actions: Vec<Action>,
    mut after_step: impl FnMut(&EditorContext),
) -> Result<Vec<StepReport>> {
    let mut reports = Vec::with_capacity(actions.len());
    for (index, action) in actions.into_iter().enumerate() {
        let step = index + 1;
        let name = action.name();
        let outcome = ctx
            .dispatch(action)
            .with_context(|| format!("step {step} ({name}) failed"))?;
        after_step(ctx);
        reports.push(StepReport {
            step,
            action: name,
            outcome: describe(&outcome),
        });
    }
    info!(
        steps = reports.len(),
        frames = ctx.history().len(),
        cursor = ctx.history().cursor(),
        "script applied"
    );
    Ok(reports)
}

/// Plain-text rendering of step reports.
pub fn outline(reports: &[StepReport]) -> String {
    reports
        .iter()
        .map(|r| format!("{}. {:<12} {}", r.step, r.action, r.outcome))
        .collect::<Vec<_>>()
        .join("\n")
}
