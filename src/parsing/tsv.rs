use std::io::Read;
use std::path::Path;

use crate::parsing::ParseError;
use crate::utils::validation::MAX_LISTING_ROWS;

/// A delimited table with a header row; every row has one cell per header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Index of a column by exact header name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Values of one column, in row order
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &str>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| row[idx].as_str()))
    }
}

/// Pick the delimiter from a file extension: tab for `.tsv`/`.tab`, comma otherwise
pub fn delimiter_for(path: &Path) -> u8 {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    match ext.as_deref() {
        Some("tsv" | "tab") => b'\t',
        _ => b',',
    }
}

/// Read a delimited file with a header row
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn read_table_file(path: &Path, delimiter: u8) -> Result<Table, ParseError> {
    let file = std::fs::File::open(path)?;
    read_table(file, delimiter)
}

/// Parse delimited text with a header row
///
/// # Errors
///
/// Returns `ParseError::Csv` for malformed records, `ParseError::InvalidFormat`
/// if there is no header row, or `ParseError::TooManyRows` if the limit is
/// exceeded.
pub fn parse_table_text(text: &str, delimiter: u8) -> Result<Table, ParseError> {
    read_table(text.as_bytes(), delimiter)
}

fn read_table<R: Read>(reader: R, delimiter: u8) -> Result<Table, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(reader);

    // Headers are kept verbatim: marketplace exports carry trailing spaces
    // that are part of the column name ("Confirm Reference Number ")
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(ParseError::InvalidFormat("No header row found".to_string()));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if rows.len() >= MAX_LISTING_ROWS {
            return Err(ParseError::TooManyRows(rows.len()));
        }

        // Short rows are padded, long rows truncated, so every row lines up
        let mut row: Vec<String> = record.iter().take(headers.len()).map(str::to_string).collect();
        row.resize(headers.len(), String::new());
        rows.push(row);
    }

    Ok(Table { headers, rows })
}

/// Write a table with a header row
///
/// # Errors
///
/// Returns `ParseError::Csv` if writing fails.
pub fn write_table<W: std::io::Write>(
    writer: W,
    table: &Table,
    delimiter: u8,
) -> Result<(), ParseError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}
