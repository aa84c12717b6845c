// CtrlMend - main.rs
//
// Command-line entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading and logging initialisation
// 3. Rule set selection
// 4. The batch run, console progress, and the optional JSON report

use clap::Parser;
use ctrlmend::app::batch::{self, BatchEvent, BatchOptions};
use ctrlmend::app::rules_mgr;
use ctrlmend::core::export;
use ctrlmend::core::model::{BatchSummary, FileStatus};
use ctrlmend::platform;
use ctrlmend::platform::config::AppConfig;
use ctrlmend::util;
use ctrlmend::util::error::{self, ReportError};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// CtrlMend - batch repair of controller sources.
///
/// Replaces known mis-encoded text, adds missing API documentation
/// annotations, and normalises routing prefixes for every file listed in
/// the rule set. Files are overwritten in place.
#[derive(Parser, Debug)]
#[command(name = "ctrlmend", version, about)]
struct Cli {
    /// Directory holding one subdirectory per category (overrides config and rule set).
    #[arg(short = 'b', long = "base-dir")]
    base_dir: Option<PathBuf>,

    /// Rule set TOML to use instead of the built-in one.
    #[arg(short = 'r', long = "rules")]
    rules: Option<PathBuf>,

    /// Config file (defaults to config.toml in the platform config directory).
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Run every step but do not write any file.
    #[arg(short = 'n', long = "dry-run")]
    dry_run: bool,

    /// Write a JSON report of the batch to this file.
    #[arg(long = "report")]
    report: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| platform::config::PlatformPaths::resolve().config_file());
    let (config, config_warnings) = platform::config::load_config(&config_path);

    util::logging::init(
        cli.debug,
        config.log_level.as_deref(),
        config.log_file.as_deref(),
    );

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        dry_run = cli.dry_run,
        "CtrlMend starting"
    );

    for warning in &config_warnings {
        tracing::warn!(config = %config_path.display(), "{}", warning);
    }

    match run(&cli, &config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = %e, "CtrlMend stopped");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Load the rule set, run the batch and write the optional report.
///
/// Returns whether every file succeeded.
fn run(cli: &Cli, config: &AppConfig) -> error::Result<bool> {
    let rules_file = cli.rules.as_deref().or(config.rules_file.as_deref());
    let rules = rules_mgr::load_rules(rules_file)?;

    let options = BatchOptions {
        base_dir: cli.base_dir.clone().or(config.base_dir.clone()),
        dry_run: cli.dry_run,
    };

    let summary = batch::run_batch(&rules, &options, |event| print_event(event, cli.dry_run));
    print_summary(&summary);

    if let Some(ref report_path) = cli.report {
        write_report(&summary, report_path)?;
        println!("Report written to {}", report_path.display());
    }

    Ok(summary.all_succeeded())
}

fn print_event(event: BatchEvent<'_>, dry_run: bool) {
    match event {
        BatchEvent::CategoryStarted { category } => {
            println!("\n=== Processing {category} package ===");
        }
        BatchEvent::FileStarted { path } => println!("Processing {}...", path.display()),
        BatchEvent::FileFinished(outcome) => {
            let path = outcome.path.display();
            match &outcome.status {
                FileStatus::Repaired { .. } if dry_run => println!("✓ Would fix {path}"),
                FileStatus::Repaired { .. } => println!("✓ Fixed {path}"),
                FileStatus::Missing => println!("✗ File not found: {path}"),
                FileStatus::Failed { reason } => println!("✗ Error processing {path}: {reason}"),
            }
        }
    }
}

fn print_summary(summary: &BatchSummary) {
    println!("\n=== Summary ===");
    println!("Success: {}", summary.success_count);
    println!("Failed: {}", summary.failed_count);
}

fn write_report(summary: &BatchSummary, path: &Path) -> Result<(), ReportError> {
    let file = std::fs::File::create(path).map_err(|e| ReportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let count = export::export_json(summary, std::io::BufWriter::new(file), path)?;
    tracing::info!(path = %path.display(), files = count, "Report written");
    Ok(())
}
