use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use define_cli::import::ImportReport;
use define_cli::overview::DocumentOverview;
use define_cli::script::{read_script, run_script};
use define_model::{Document, StdConstants};
use define_persistence::{
    AutosaveHandle, EditorSettings, FileGateway, SessionSnapshot, load_snapshot, read_document,
    write_document,
};
use define_store::{EditorContext, Resolution, integrity};

use crate::cli::{ApplyArgs, CheckArgs, InspectArgs, ReconcileArgs, ResolveArg};
use crate::types::{ApplyResult, CheckResult, ReconcileResult, SessionStatus};

fn open_document(path: &Path) -> Result<Document> {
    read_document(path).with_context(|| format!("failed to open {}", path.display()))
}

fn open_context(path: &Path, settings: &EditorSettings) -> Result<EditorContext> {
    let document = open_document(path)?;
    EditorContext::open(document, settings.store_config())
        .with_context(|| format!("{} does not pass the integrity check", path.display()))
}

pub fn run_inspect(args: &InspectArgs) -> Result<DocumentOverview> {
    let document = open_document(&args.document)?;
    Ok(DocumentOverview::from_document(&document))
}

pub fn run_check(args: &CheckArgs) -> Result<CheckResult> {
    let span = info_span!("check", document = %args.document.display());
    let _guard = span.enter();

    let document = open_document(&args.document)?;
    let report = integrity::verify(&document, &StdConstants::default());
    info!(issues = report.len(), "integrity check finished");

    let session = match &args.session {
        Some(path) => {
            let snapshot = load_snapshot(path)
                .with_context(|| format!("failed to read session {}", path.display()))?;
            Some(match snapshot.verify_document(&document) {
                Ok(()) => SessionStatus::Matches {
                    frames: snapshot.history.frames,
                    cursor: snapshot.history.cursor,
                },
                Err(err) => SessionStatus::Stale {
                    reason: err.user_message(),
                },
            })
        }
        None => None,
    };

    Ok(CheckResult {
        document: args.document.clone(),
        report,
        session,
    })
}

pub fn run_apply(args: &ApplyArgs, settings: &EditorSettings) -> Result<ApplyResult> {
    let span = info_span!("apply", document = %args.document.display());
    let _guard = span.enter();

    let mut ctx = open_context(&args.document, settings)?;
    let actions = read_script(&args.script)?;

    let Some(session_path) = args.session.clone().filter(|_| !args.dry_run) else {
        let steps = run_script(&mut ctx, actions, |_| {})?;
        let output = write_output(&ctx, args)?;
        return Ok(ApplyResult {
            steps,
            frames: ctx.history().len(),
            cursor: ctx.history().cursor(),
            output,
            session: None,
        });
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("failed to start the auto-save runtime")?;
    runtime.block_on(async {
        let autosave = AutosaveHandle::spawn(
            FileGateway::new(&session_path),
            settings.autosave.clone(),
        );
        publish(&autosave, &ctx);
        let steps = run_script(&mut ctx, actions, |ctx| publish(&autosave, ctx))?;
        let output = write_output(&ctx, args)?;
        let stats = autosave
            .shutdown()
            .await
            .with_context(|| format!("failed to save session {}", session_path.display()))?;
        Ok::<_, anyhow::Error>(ApplyResult {
            steps,
            frames: ctx.history().len(),
            cursor: ctx.history().cursor(),
            output,
            session: Some((session_path.clone(), stats)),
        })
    })
}

fn publish(autosave: &AutosaveHandle, ctx: &EditorContext) {
    match SessionSnapshot::project(ctx) {
        Ok(snapshot) => autosave.publish(snapshot),
        Err(err) => warn!(error = %err, "could not capture session snapshot"),
    }
}

fn write_output(ctx: &EditorContext, args: &ApplyArgs) -> Result<Option<PathBuf>> {
    if args.dry_run {
        return Ok(None);
    }
    let output = args.output.clone().unwrap_or_else(|| args.document.clone());
    write_document(ctx.document(), &output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    Ok(Some(output))
}

pub fn run_reconcile(args: &ReconcileArgs, settings: &EditorSettings) -> Result<ReconcileResult> {
    let span = info_span!("reconcile", incoming = %args.incoming.display());
    let _guard = span.enter();

    let mut ctx = open_context(&args.document, settings)?;
    let incoming = open_document(&args.incoming)?;
    let report = ImportReport::build(ctx.document(), &incoming);
    info!(
        noop = report.is_noop(),
        conflicts = report.has_conflicts(),
        "reconciled incoming document"
    );

    let Some(output) = &args.output else {
        return Ok(ReconcileResult {
            report,
            written: None,
        });
    };

    let resolution = match args.resolve {
        ResolveArg::KeepLocal => Resolution::KeepLocal,
        ResolveArg::AdoptIncoming => Resolution::AdoptIncoming,
    };
    run_script(&mut ctx, report.clone().into_actions(resolution), |_| {})
        .context("failed to apply the import")?;
    write_document(ctx.document(), output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    Ok(ReconcileResult {
        report,
        written: Some(output.clone()),
    })
}
