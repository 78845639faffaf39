//! callmap core library - inventory of functions and methods in JavaScript sources

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Classification is strictly per-file
// - No global mutable state
// - Output order is file discovery order, then pre-order within a file
// - Parallel scans re-serialize into discovery order
// - Identical input yields byte-for-byte identical output

pub mod analysis;
pub mod config;
pub mod discover;
pub mod error;
pub mod parser;
pub mod record;
pub mod report;
pub mod walk;

pub use config::ResolvedConfig;
pub use error::{ParseError, ScanError, ScanResult};
pub use record::{CallableKind, CallableRecord, MethodRole};
pub use report::{render_json, render_text};

use analysis::FileScan;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Options for a single scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Path substrings to skip
    pub ignored: Vec<String>,
    /// Worker count: 1 = sequential, 0 = one per core, N = fixed pool
    pub jobs: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        ScanOptions {
            ignored: walk::default_ignored(),
            jobs: 1,
        }
    }
}

impl From<&ResolvedConfig> for ScanOptions {
    fn from(config: &ResolvedConfig) -> Self {
        ScanOptions {
            ignored: config.ignore.clone(),
            jobs: config.jobs,
        }
    }
}

/// Outcome of a project scan
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Records in discovery order
    pub records: Vec<CallableRecord>,
    /// Files skipped because they failed to parse, in discovery order
    pub parse_failures: Vec<ParseError>,
}

/// Scan every source file under `root` and collect its callable constructs
///
/// Directory listing and file read failures abort the scan; parse failures
/// only skip the offending file.
pub fn scan_project(root: &Path, options: &ScanOptions) -> ScanResult<ScanReport> {
    let files = walk::walk(root, &options.ignored)?;
    tracing::debug!(root = %root.display(), files = files.len(), "discovered source files");

    let scans = scan_files(&files, options.jobs)?;

    let mut report = ScanReport::default();
    for scan in scans {
        report.records.extend(scan.records);
        report.parse_failures.extend(scan.parse_error);
    }

    if !report.parse_failures.is_empty() {
        tracing::warn!(
            "skipped {} file(s) due to parse errors",
            report.parse_failures.len()
        );
    }

    Ok(report)
}

/// Scan files, returning per-file results in the order given
fn scan_files(files: &[PathBuf], jobs: usize) -> ScanResult<Vec<FileScan>> {
    if jobs == 1 {
        return files.iter().map(|f| analysis::scan_file(f)).collect();
    }

    let scan_parallel = || {
        files
            .par_iter()
            .map(|f| analysis::scan_file(f))
            .collect::<ScanResult<Vec<_>>>()
    };

    if jobs == 0 {
        return scan_parallel();
    }

    match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
        Ok(pool) => pool.install(scan_parallel),
        Err(e) => {
            tracing::warn!("failed to build thread pool, using global pool: {}", e);
            scan_parallel()
        }
    }
}
