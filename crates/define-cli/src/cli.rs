//! CLI argument definitions for the Define editor.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "define-editor",
    version,
    about = "Define document editor - inspect, check and edit study metadata",
    long_about = "Inspect, check and edit Define documents stored as JSON.\n\n\
                  Edits are scripted as JSON arrays of actions and applied with\n\
                  full undo history, integrity checking and session snapshots."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Settings file (default: the platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show datasets, code lists and entity counts.
    Inspect(InspectArgs),

    /// Run the integrity check; exits non-zero on any issue.
    Check(CheckArgs),

    /// Apply a JSON action script and write the result.
    Apply(ApplyArgs),

    /// Compare comments, methods, leafs and code lists with another document.
    Reconcile(ReconcileArgs),
}

#[derive(Parser)]
pub struct InspectArgs {
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,
}

#[derive(Parser)]
pub struct CheckArgs {
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// Also verify that this session snapshot was taken of DOCUMENT.
    #[arg(long = "session", value_name = "PATH")]
    pub session: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ApplyArgs {
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// JSON array of actions.
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,

    /// Where to write the edited document (default: overwrite DOCUMENT).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Save a session snapshot here when done.
    #[arg(long = "session", value_name = "PATH")]
    pub session: Option<PathBuf>,

    /// Report outcomes without writing anything.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct ReconcileArgs {
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// Document to take entities from.
    #[arg(value_name = "INCOMING")]
    pub incoming: PathBuf,

    /// How to settle entities that differ on both sides.
    #[arg(long = "resolve", value_enum, default_value = "keep-local")]
    pub resolve: ResolveArg,

    /// Apply the import and write the merged document here.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ResolveArg {
    KeepLocal,
    AdoptIncoming,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
