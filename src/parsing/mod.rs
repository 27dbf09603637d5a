//! Readers for reference lists and listing tables.
//!
//! - **Reference lists**: one reference per line, `#` comments allowed
//! - **CSV/TSV tables**: a header row followed by records; references are taken
//!   from a named column
//!
//! ## Example
//!
//! ```rust,no_run
//! use watch_ref::parsing::references::{parse_reference_list, references_from_table};
//! use watch_ref::parsing::tsv::parse_table_text;
//!
//! let refs = parse_reference_list("116610LN\n6542/8\n").unwrap();
//! assert_eq!(refs, vec!["116610LN", "6542/8"]);
//!
//! let table = parse_table_text("Model,Confirm Reference Number \nSub,116610LN\n", b',').unwrap();
//! let refs = references_from_table(&table, "Confirm Reference Number ").unwrap();
//! ```

use thiserror::Error;

pub mod references;
pub mod tsv;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Column '{0}' not found")]
    MissingColumn(String),

    #[error("Too many references: {0} exceeds maximum allowed (100000)")]
    TooManyReferences(usize),

    #[error("Too many rows: {0} exceeds maximum allowed (1000000)")]
    TooManyRows(usize),
}
