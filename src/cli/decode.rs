use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;

use crate::catalog::store::ReferenceCatalog;
use crate::cli::batch::write_records;
use crate::cli::OutputFormat;
use crate::core::types::{DigitLookup, ModelResolution};
use crate::matching::diagnosis::DecodeExplanation;
use crate::matching::engine::ReferenceDecoder;
use crate::utils::validation::validate_reference;

#[derive(Args)]
pub struct DecodeArgs {
    /// Reference numbers to decode (e.g. 116610LN 16710BLNR)
    #[arg(required = true)]
    pub references: Vec<String>,

    /// Show how each field was reached
    #[arg(long)]
    pub explain: bool,
}

/// Execute decode subcommand
///
/// # Errors
///
/// Returns an error if a reference fails validation, the catalog cannot be
/// loaded, or output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(
    args: DecodeArgs,
    format: OutputFormat,
    catalog: Option<PathBuf>,
    verbose: bool,
) -> anyhow::Result<()> {
    for reference in &args.references {
        validate_reference(reference)?;
    }

    let catalog = ReferenceCatalog::load(catalog.as_deref())?;
    if verbose {
        eprintln!(
            "Loaded catalog with {} model families and {} override references",
            catalog.len(),
            catalog.override_reference_count()
        );
    }

    let decoder = ReferenceDecoder::new(&catalog);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !args.explain {
        let records: Vec<_> = args.references.iter().map(|r| decoder.decode(r)).collect();
        return write_records(&mut out, &records, format);
    }

    let explanations: Vec<_> = args.references.iter().map(|r| decoder.explain(r)).collect();
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &explanations)?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            for (i, explanation) in explanations.iter().enumerate() {
                if i > 0 {
                    writeln!(out)?;
                }
                write_explanation(&mut out, explanation)?;
            }
        }
        OutputFormat::Tsv | OutputFormat::Csv => {
            // Delimited output has no room for the trace; emit the plain rows
            let records: Vec<_> = explanations.into_iter().map(|e| e.decoded).collect();
            write_records(&mut out, &records, format)?;
        }
    }

    Ok(())
}

fn write_explanation<W: Write>(out: &mut W, explanation: &DecodeExplanation) -> io::Result<()> {
    let decoded = &explanation.decoded;
    writeln!(out, "{}", decoded.reference_number)?;
    writeln!(out, "   Digits: {}", explanation.numeric_part)?;
    writeln!(out, "   Letters: {}", explanation.letters)?;

    if explanation.prefix_candidates.is_empty() {
        writeln!(out, "   Prefix matches: none")?;
    } else {
        writeln!(out, "   Prefix matches:")?;
        for candidate in &explanation.prefix_candidates {
            writeln!(
                out,
                "      {} ({} digits): {}",
                candidate.code,
                candidate.length,
                candidate.families.join(", ")
            )?;
        }
    }

    match &explanation.resolution {
        ModelResolution::Override { model } => {
            writeln!(out, "   Model: {model} (override)")?;
        }
        ModelResolution::Prefix { model, length, .. } => {
            writeln!(out, "   Model: {model} (longest prefix, {length} digits)")?;
        }
        ModelResolution::Unresolved => {
            writeln!(out, "   Model: {}", decoded.model)?;
        }
    }

    writeln!(
        out,
        "   Bezel: {}{}",
        decoded.bezel,
        digit_suffix(explanation.bezel_digit)
    )?;
    writeln!(
        out,
        "   Case Material: {}{}",
        decoded.case_material,
        digit_suffix(explanation.case_material_digit)
    )?;
    writeln!(
        out,
        "   Reference Letters: {}",
        decoded.reference_letters_meaning
    )?;

    for note in explanation.notes() {
        writeln!(out, "   Note: {note}")?;
    }
    Ok(())
}

fn digit_suffix(lookup: DigitLookup) -> String {
    lookup
        .digit()
        .map(|d| format!(" (digit {d})"))
        .unwrap_or_default()
}
