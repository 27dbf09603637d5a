use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;

use clap::Args;

use crate::catalog::store::ReferenceCatalog;
use crate::cli::OutputFormat;
use crate::core::decoded::{DecodedReference, DECODED_COLUMNS};
use crate::matching::batch::decode_batch;
use crate::matching::engine::ReferenceDecoder;
use crate::parsing::references::{
    parse_reference_list, read_references_file, DEFAULT_REFERENCE_COLUMN,
};

#[derive(Args)]
pub struct BatchArgs {
    /// Input file: plain list (one reference per line), CSV, or TSV.
    /// Use '-' for stdin (expects a plain list)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Column holding the references (CSV/TSV input only)
    #[arg(long, default_value = DEFAULT_REFERENCE_COLUMN)]
    pub column: String,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute batch subcommand
///
/// # Errors
///
/// Returns an error if the input or catalog cannot be read, or the output
/// cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(
    args: BatchArgs,
    format: OutputFormat,
    catalog: Option<PathBuf>,
    verbose: bool,
) -> anyhow::Result<()> {
    let references = if args.input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        parse_reference_list(&buffer)?
    } else {
        read_references_file(&args.input, &args.column)?
    };

    let catalog = ReferenceCatalog::load(catalog.as_deref())?;
    let decoder = ReferenceDecoder::new(&catalog);
    let output = decode_batch(&decoder, &references);

    if verbose {
        eprintln!(
            "Decoded {} references ({} skipped as missing)",
            output.records.len(),
            output.skipped
        );
    }

    match &args.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_records(&mut writer, &output.records, format)?;
            writer.flush()?;
        }
        None => {
            let stdout = io::stdout();
            write_records(&mut stdout.lock(), &output.records, format)?;
        }
    }

    Ok(())
}

/// Write decoded references in the requested format
///
/// # Errors
///
/// Returns an error if writing or serialization fails.
pub fn write_records<W: Write>(
    writer: &mut W,
    records: &[DecodedReference],
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for (i, record) in records.iter().enumerate() {
                if i > 0 {
                    writeln!(writer)?;
                }
                write_text_record(writer, record)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, records)?;
            writeln!(writer)?;
        }
        OutputFormat::Tsv => write_delimited(writer, records, b'\t')?,
        OutputFormat::Csv => write_delimited(writer, records, b',')?,
    }
    Ok(())
}

fn write_text_record<W: Write>(writer: &mut W, record: &DecodedReference) -> io::Result<()> {
    writeln!(writer, "{}", record.reference_number)?;
    writeln!(writer, "   Model: {}", record.model)?;
    writeln!(writer, "   Bezel: {}", record.bezel)?;
    writeln!(writer, "   Case Material: {}", record.case_material)?;
    if record.reference_letters.is_empty() {
        writeln!(writer, "   Reference Letters: {}", record.reference_letters_meaning)
    } else {
        writeln!(
            writer,
            "   Reference Letters: {} ({})",
            record.reference_letters, record.reference_letters_meaning
        )
    }
}

fn write_delimited<W: Write>(
    writer: &mut W,
    records: &[DecodedReference],
    delimiter: u8,
) -> anyhow::Result<()> {
    let mut out = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);
    out.write_record(DECODED_COLUMNS)?;
    for record in records {
        out.write_record(record.to_record())?;
    }
    out.flush()?;
    Ok(())
}
