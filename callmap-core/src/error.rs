//! Error types for scanning
//!
//! Only `ParseError` is recovered (per file). Every `ScanError` aborts the run.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors raised while walking or reading a project
#[derive(Debug, Error)]
pub enum ScanError {
    /// A directory could not be listed, or one of its entries could not be stat'ed
    #[error("failed to read directory: {}", path.display())]
    DirectoryAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A discovered source file could not be read
    #[error("failed to read file: {}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A single file's source text could not be parsed
///
/// Recovered locally: the file contributes zero records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{file}:{line}: {message}")]
pub struct ParseError {
    pub file: String,
    /// 1-based line the parser stopped at (0 if unknown)
    pub line: u32,
    pub message: String,
}

pub type ScanResult<T> = Result<T, ScanError>;
