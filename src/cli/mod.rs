//! Command-line interface for watch-ref.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **decode**: Decode one or more reference numbers
//! - **batch**: Decode every reference in a list or CSV/TSV column
//! - **clean**: Clean a marketplace listing export
//! - **catalog**: List, show, or export the lookup tables
//! - **serve**: Start the JSON API
//!
//! ## Usage
//!
//! ```text
//! # Decode a single reference
//! watch-ref decode 116610LN
//!
//! # Show how the model family was chosen
//! watch-ref decode 16710BLNR --explain
//!
//! # Decode the confirmed reference column of a cleaned export
//! watch-ref batch cleaned.csv --format csv -o decoded.csv
//!
//! # Pipe a plain list
//! cat refs.txt | watch-ref batch -
//!
//! # Clean a listing export
//! watch-ref clean listings.csv -o cleaned.csv
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod batch;
pub mod catalog;
pub mod clean;
pub mod decode;

#[derive(Parser)]
#[command(name = "watch-ref")]
#[command(version)]
#[command(about = "Decode watch reference numbers and clean marketplace listings")]
#[command(
    long_about = "watch-ref decodes watch reference numbers into model family, bezel, case material and reference-letter meaning.\n\nIt matches references against a catalog of known codes and provides:\n- Exact overrides for references the prefix rules get wrong\n- Longest-prefix model matching with a fixed tie-break order\n- Explicit Unknown / N/A markers instead of errors"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Path to custom catalog file (defaults to the embedded catalog)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decode reference numbers
    Decode(decode::DecodeArgs),

    /// Decode every reference in a file
    Batch(batch::BatchArgs),

    /// Clean a marketplace listing export (CSV/TSV)
    Clean(clean::CleanArgs),

    /// Inspect the lookup tables
    Catalog(catalog::CatalogArgs),

    /// Start the web server
    Serve(ServeArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
    Csv,
}
