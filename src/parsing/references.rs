use std::path::Path;

use tracing::warn;

use crate::parsing::tsv::{delimiter_for, read_table_file, Table};
use crate::parsing::ParseError;
use crate::utils::validation::{check_batch_limit, validate_reference};

/// Column the listing cleaner fills with confirmed reference numbers.
/// The trailing space is part of the exported header.
pub const DEFAULT_REFERENCE_COLUMN: &str = "Confirm Reference Number ";

/// Parse a plain reference list: one reference per line.
///
/// Lines are trimmed; blank lines and lines starting with `#` are skipped.
/// Every other line is kept as-is, however long or odd: the decoder turns
/// unusable input into sentinel fields, so one bad line never sinks a batch.
///
/// # Errors
///
/// Returns `ParseError::TooManyReferences` if the limit is exceeded.
pub fn parse_reference_list(text: &str) -> Result<Vec<String>, ParseError> {
    let mut references = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if check_batch_limit(references.len()).is_some() {
            return Err(ParseError::TooManyReferences(references.len()));
        }
        // Line numbers are 1-based for user friendliness
        note_unusual(line, || format!("Line {}", i + 1));
        references.push(line.to_string());
    }

    Ok(references)
}

/// Take the raw values of `column`, in row order.
///
/// Values are returned untouched, including empty cells, `No Reference`
/// markers, over-long cells and multi-line cells; filtering is the batch
/// driver's job.
///
/// # Errors
///
/// Returns `ParseError::MissingColumn` if the header is absent, or
/// `ParseError::TooManyReferences` if the limit is exceeded.
pub fn references_from_table(table: &Table, column: &str) -> Result<Vec<String>, ParseError> {
    let values = table
        .column(column)
        .ok_or_else(|| ParseError::MissingColumn(column.to_string()))?;

    let mut references = Vec::new();
    for (i, value) in values.enumerate() {
        if check_batch_limit(references.len()).is_some() {
            return Err(ParseError::TooManyReferences(references.len()));
        }
        // Row 1 is the header
        note_unusual(value, || format!("Row {}", i + 2));
        references.push(value.to_string());
    }

    Ok(references)
}

/// Log entries that would fail single-reference validation; they are still
/// decoded
fn note_unusual(value: &str, location: impl FnOnce() -> String) {
    if let Err(e) = validate_reference(value) {
        warn!("{}: {e}; decoding as-is", location());
    }
}

/// Read references from a file.
///
/// `.csv`, `.tsv` and `.tab` files are read as tables and `column` is
/// extracted; anything else is read as a plain list.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or the errors of
/// [`parse_reference_list`] and [`references_from_table`].
pub fn read_references_file(path: &Path, column: &str) -> Result<Vec<String>, ParseError> {
    if is_table_file(path) {
        let table = read_table_file(path, delimiter_for(path))?;
        references_from_table(&table, column)
    } else {
        let text = std::fs::read_to_string(path)?;
        parse_reference_list(&text)
    }
}

fn is_table_file(path: &Path) -> bool {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);
    matches!(ext.as_deref(), Some("csv" | "tsv" | "tab"))
}
