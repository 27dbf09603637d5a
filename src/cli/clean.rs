use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Args;

use crate::cleaning::listing::clean_table;
use crate::cli::OutputFormat;
use crate::parsing::tsv::{delimiter_for, read_table_file, write_table, Table};

#[derive(Args)]
pub struct CleanArgs {
    /// Listing export to clean (CSV, or TSV by extension)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Keep every input column (including `Confirm Reference Number `) and
    /// skip the final drop/rename, so the result can be fed to `batch`
    #[arg(long)]
    pub no_finalize: bool,
}

/// Execute clean subcommand
///
/// # Errors
///
/// Returns an error if the input cannot be parsed or the output cannot be
/// written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CleanArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let input_delimiter = delimiter_for(&args.input);
    let table = read_table_file(&args.input, input_delimiter)?;

    if verbose {
        eprintln!(
            "Read {} rows with {} columns from {}",
            table.rows.len(),
            table.headers.len(),
            args.input.display()
        );
    }

    let cleaned = clean_table(&table, !args.no_finalize);

    // Explicit tsv/csv wins; otherwise follow the output (or input) extension
    let delimiter = match format {
        OutputFormat::Tsv => b'\t',
        OutputFormat::Csv => b',',
        OutputFormat::Text | OutputFormat::Json => args
            .output
            .as_deref()
            .map_or(input_delimiter, delimiter_for),
    };

    match &args.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_cleaned(&mut writer, &cleaned, format, delimiter)?;
            writer.flush()?;
            if verbose {
                eprintln!("Wrote {} cleaned rows to {}", cleaned.rows.len(), path.display());
            }
        }
        None => {
            let stdout = io::stdout();
            write_cleaned(&mut stdout.lock(), &cleaned, format, delimiter)?;
        }
    }

    Ok(())
}

fn write_cleaned<W: Write>(
    writer: &mut W,
    table: &Table,
    format: OutputFormat,
    delimiter: u8,
) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        let json = serde_json::json!({
            "headers": table.headers,
            "rows": table.rows,
        });
        serde_json::to_writer_pretty(&mut *writer, &json)?;
        writeln!(writer)?;
        return Ok(());
    }
    write_table(writer, table, delimiter)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::tsv::parse_table_text;

    #[test]
    fn test_write_cleaned_json() {
        let table = parse_table_text("Model,Price\nSub,\"$12,500\"\n", b',').unwrap();
        let cleaned = clean_table(&table, true);

        let mut out = Vec::new();
        write_cleaned(&mut out, &cleaned, OutputFormat::Json, b',').unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["headers"][0], "Model");
        assert_eq!(value["rows"][0][0], "Sub");
    }

    #[test]
    fn test_write_cleaned_tsv() {
        let table = Table {
            headers: vec!["Model".to_string()],
            rows: vec![vec!["Sub".to_string()]],
        };
        let mut out = Vec::new();
        write_cleaned(&mut out, &table, OutputFormat::Tsv, b'\t').unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Model\nSub\n");
    }
}
