//! Source file discovery
//!
//! Global invariants enforced:
//! - Symbolic links are never followed or reported
//! - Ignore rules are substring matches over the full path string
//! - Identical trees yield identical file order

use crate::error::{ScanError, ScanResult};
use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};

/// File name suffixes recognised as JavaScript sources (case-sensitive)
pub const SOURCE_EXTENSIONS: &[&str] = &[".js", ".mjs", ".jsm"];

/// Ignore substrings applied when none are configured
pub const DEFAULT_IGNORED: &[&str] = &["node_modules", "tests"];

/// Default ignore set as owned strings
pub fn default_ignored() -> Vec<String> {
    DEFAULT_IGNORED.iter().map(|s| s.to_string()).collect()
}

/// Check if a file name ends in a recognised extension
pub fn is_source_file_name(filename: &str) -> bool {
    SOURCE_EXTENSIONS.iter().any(|ext| filename.ends_with(ext))
}

/// Check if any ignore substring occurs anywhere in the path
///
/// This over-matches on purpose: `"tests"` also skips `contests/` and
/// `attests.js`.
pub fn is_ignored(path: &Path, ignored: &[String]) -> bool {
    let path_str = path.to_string_lossy();
    ignored.iter().any(|needle| path_str.contains(needle.as_str()))
}

/// Collect source files under `root` in discovery order
///
/// Within each directory entries are taken in file name order. A directory
/// is expanded in place, before the entries that follow it.
pub fn walk(root: &Path, ignored: &[String]) -> ScanResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    walk_recursive(root, ignored, &mut files)?;
    Ok(files)
}

/// Recursively collect source files from a directory
fn walk_recursive(dir: &Path, ignored: &[String], files: &mut Vec<PathBuf>) -> ScanResult<()> {
    let directory_error = |source| ScanError::DirectoryAccess {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(dir)
        .map_err(directory_error)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(directory_error)?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        if is_ignored(&path, ignored) {
            tracing::trace!(path = %path.display(), "ignored");
            continue;
        }

        // Never stat through the link: a link to a directory must not look like one
        let metadata = fs::symlink_metadata(&path).map_err(|source| ScanError::DirectoryAccess {
            path: path.clone(),
            source,
        })?;
        process_dir_entry(path, metadata, ignored, files)?;
    }

    Ok(())
}

/// Process one directory entry, pushing source files or recursing into dirs
fn process_dir_entry(
    path: PathBuf,
    metadata: Metadata,
    ignored: &[String],
    files: &mut Vec<PathBuf>,
) -> ScanResult<()> {
    if metadata.is_symlink() {
        tracing::trace!(path = %path.display(), "skipping symlink");
        return Ok(());
    }

    if metadata.is_dir() {
        walk_recursive(&path, ignored, files)?;
    } else if metadata.is_file() {
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(is_source_file_name);
        if matches {
            files.push(path);
        }
    }

    Ok(())
}
