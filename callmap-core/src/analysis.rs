//! Per-file scanning - ties together reading, parsing, and discovery

use crate::discover;
use crate::error::{ParseError, ScanError, ScanResult};
use crate::parser;
use crate::record::CallableRecord;
use std::path::Path;
use swc_common::{sync::Lrc, SourceMap};

/// Result of scanning one file
///
/// A file that failed to parse carries no records and its parse error.
#[derive(Debug, Default)]
pub struct FileScan {
    pub records: Vec<CallableRecord>,
    pub parse_error: Option<ParseError>,
}

/// Read, parse, and classify a single source file
///
/// Parse failures are logged and isolated to this file. Read failures are
/// returned as errors.
pub fn scan_file(path: &Path) -> ScanResult<FileScan> {
    let bytes = std::fs::read(path).map_err(|source| ScanError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let src = String::from_utf8_lossy(&bytes);
    let file = path.to_string_lossy();

    // One source map per file keeps workers independent
    let source_map: Lrc<SourceMap> = Default::default();

    match parser::parse_source(&src, &source_map, &file) {
        Ok(module) => {
            let records = discover::discover_callables(&module, &file, &source_map);
            tracing::debug!(file = %file, count = records.len(), "classified");
            Ok(FileScan {
                records,
                parse_error: None,
            })
        }
        Err(e) => {
            tracing::warn!(
                file = %e.file,
                line = e.line,
                "error parsing file: {}",
                e.message
            );
            Ok(FileScan {
                records: Vec::new(),
                parse_error: Some(e),
            })
        }
    }
}
