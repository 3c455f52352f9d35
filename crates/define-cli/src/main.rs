//! Define document editor CLI.

use clap::{ColorChoice, Parser};
use define_cli::logging::{LogConfig, LogFormat, init_logging};
use define_persistence::EditorSettings;
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;
mod types;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_apply, run_check, run_inspect, run_reconcile};
use crate::summary::{print_apply, print_check, print_overview, print_reconcile};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let settings = match &cli.config {
        Some(path) => EditorSettings::load_from(path),
        None => EditorSettings::load(),
    };

    let exit_code = match cli.command {
        Command::Inspect(args) => report(run_inspect(&args), |overview| {
            print_overview(&overview);
            0
        }),
        Command::Check(args) => report(run_check(&args), |result| {
            print_check(&result);
            i32::from(!result.passed())
        }),
        Command::Apply(args) => report(run_apply(&args, &settings), |result| {
            print_apply(&result);
            i32::from(result.has_rejections())
        }),
        Command::Reconcile(args) => report(run_reconcile(&args, &settings), |result| {
            print_reconcile(&result);
            0
        }),
    };
    std::process::exit(exit_code);
}

fn report<T>(result: anyhow::Result<T>, on_success: impl FnOnce(T) -> i32) -> i32 {
    match result {
        Ok(value) => on_success(value),
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
