//! callmap CLI - list the functions and methods of a JavaScript project

#![deny(warnings)]

// Global invariants enforced:
// - Deterministic output ordering
// - Identical input yields byte-for-byte identical output
// - Stdout carries only the report; diagnostics go to stderr

use anyhow::Context;
use callmap_core::{config, render_json, render_text, scan_project, ScanOptions};
use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "callmap")]
#[command(
    about = "List the functions, function expressions, and class methods of a JavaScript project"
)]
#[command(version)]
struct Cli {
    /// Project root directory
    path: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "text")]
    format: OutputFormat,

    /// Skip any path containing this substring (repeatable, replaces the defaults)
    #[arg(long = "ignore", value_name = "SUBSTRING")]
    ignore: Vec<String>,

    /// Path to config file (default: auto-discover in the project root)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Parser workers: 1 = sequential, 0 = one per core (overrides config file)
    #[arg(long)]
    jobs: Option<usize>,

    /// Only report errors on stderr
    #[arg(long, short)]
    quiet: bool,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    let Some(path) = cli.path else {
        anyhow::bail!("{}", Cli::command().render_usage());
    };

    if !path.exists() {
        anyhow::bail!("Directory \"{}\" does not exist.", path.display());
    }

    let resolved_config = config::load_and_resolve(&path, cli.config.as_deref())
        .context("failed to load configuration")?;

    if let Some(config_path) = &resolved_config.config_path {
        tracing::info!("Using config: {}", config_path.display());
    }

    // CLI flags override config file values
    let mut options = ScanOptions::from(&resolved_config);
    if !cli.ignore.is_empty() {
        options.ignored = cli.ignore;
    }
    if let Some(jobs) = cli.jobs {
        options.jobs = jobs;
    }

    let spinner = scan_spinner(&path, cli.quiet);
    let result = scan_project(&path, &options);
    spinner.finish_and_clear();
    let report = result.with_context(|| format!("failed to scan {}", path.display()))?;

    match cli.format {
        OutputFormat::Text => {
            println!("Function Definitions and Methods:");
            print!("{}", render_text(&report.records));
        }
        OutputFormat::Json => {
            println!("{}", render_json(&report.records));
        }
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` overrides the default level
fn init_tracing(quiet: bool) {
    let default_level = if quiet { "error" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(std::io::stderr().is_terminal())
                .without_time(),
        )
        .with(filter)
        .init();
}

/// Spinner on stderr while scanning (hidden when stderr is not a terminal)
fn scan_spinner(path: &Path, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(format!("Scanning {}...", path.display()));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
