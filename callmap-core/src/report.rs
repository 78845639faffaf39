//! Reporting and output generation
//!
//! Global invariants enforced:
//! - Records are rendered in the order given (discovery order)
//! - Byte-for-byte identical output across runs

use crate::record::CallableRecord;

const HEADERS: [&str; 5] = ["(index)", "name", "file", "line", "kind"];

/// Render records as an aligned text table
///
/// Columns are sized to their widest cell, so nothing is truncated.
pub fn render_text(records: &[CallableRecord]) -> String {
    let rows: Vec<[String; 5]> = records
        .iter()
        .enumerate()
        .map(|(index, r)| {
            [
                index.to_string(),
                r.name.clone(),
                r.file.clone(),
                r.line.to_string(),
                r.kind.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut output = String::new();
    push_row(&mut output, &HEADERS.map(String::from), &widths);
    push_separator(&mut output, &widths);
    for row in &rows {
        push_row(&mut output, row, &widths);
    }

    output
}

fn push_row(output: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join(" | ");
    output.push_str(line.trim_end());
    output.push('\n');
}

fn push_separator(output: &mut String, widths: &[usize; 5]) {
    let line = widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("-+-");
    output.push_str(&line);
    output.push('\n');
}

/// Render records as JSON output
pub fn render_json(records: &[CallableRecord]) -> String {
    serde_json::to_string_pretty(records).unwrap_or_else(|_| "[]".to_string())
}
