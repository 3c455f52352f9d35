//! Command results handed to the summary printers.

use std::path::PathBuf;

use define_cli::import::ImportReport;
use define_cli::script::StepReport;
use define_persistence::AutosaveStats;
use define_store::IntegrityReport;

/// Whether a session snapshot still matches its document.
#[derive(Debug)]
pub enum SessionStatus {
    Matches { frames: usize, cursor: usize },
    Stale { reason: String },
}

#[derive(Debug)]
pub struct CheckResult {
    pub document: PathBuf,
    pub report: IntegrityReport,
    pub session: Option<SessionStatus>,
}

impl CheckResult {
    pub fn passed(&self) -> bool {
        self.report.is_empty() && !matches!(self.session, Some(SessionStatus::Stale { .. }))
    }
}

#[derive(Debug)]
pub struct ApplyResult {
    pub steps: Vec<StepReport>,
    pub frames: usize,
    pub cursor: usize,
    /// `None` on a dry run.
    pub output: Option<PathBuf>,
    pub session: Option<(PathBuf, AutosaveStats)>,
}

impl ApplyResult {
    pub fn has_rejections(&self) -> bool {
        self.steps.iter().any(StepReport::is_rejected)
    }
}

#[derive(Debug)]
pub struct ReconcileResult {
    pub report: ImportReport,
    pub written: Option<PathBuf>,
}
