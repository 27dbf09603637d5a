use std::io;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};

use crate::catalog::store::ReferenceCatalog;
use crate::cli::OutputFormat;

#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// Summarize the catalog (table sizes and version)
    List,

    /// Show the entries of one lookup table
    Show {
        /// Table to show
        #[arg(required = true, value_enum)]
        kind: TableKind,
    },

    /// Export the catalog to a file
    Export {
        /// Output file path
        #[arg(required = true)]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum TableKind {
    /// Model families and their numeric codes
    Families,
    /// Exact-reference overrides
    Overrides,
    /// Bezel digit meanings
    Bezels,
    /// Case material digit meanings
    CaseMaterials,
    /// Reference letter meanings
    Letters,
}

impl TableKind {
    fn headers(self) -> [&'static str; 2] {
        match self {
            Self::Families => ["family", "codes"],
            Self::Overrides => ["model", "references"],
            Self::Bezels | Self::CaseMaterials => ["digit", "name"],
            Self::Letters => ["letters", "meaning"],
        }
    }
}

/// Execute catalog subcommand
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(
    args: CatalogArgs,
    format: OutputFormat,
    catalog_path: Option<PathBuf>,
    verbose: bool,
) -> anyhow::Result<()> {
    let catalog = ReferenceCatalog::load(catalog_path.as_deref())?;

    if verbose {
        eprintln!("Loaded catalog with {} model families", catalog.len());
    }

    match args.command {
        CatalogCommands::List => run_list(&catalog, format),
        CatalogCommands::Show { kind } => run_show(&catalog, kind, format),
        CatalogCommands::Export { output } => run_export(&catalog, &output),
    }
}

fn run_list(catalog: &ReferenceCatalog, format: OutputFormat) -> anyhow::Result<()> {
    let summary = catalog.summary();

    match format {
        OutputFormat::Text => {
            println!(
                "Catalog: {} (version {})\n",
                summary.brand.as_deref().unwrap_or("unbranded"),
                summary.version
            );
            println!("{:<22} {:>8}", "Table", "Entries");
            println!("{}", "-".repeat(31));
            println!("{:<22} {:>8}", "Model families", summary.model_families);
            println!("{:<22} {:>8}", "Distinct family codes", summary.distinct_codes);
            println!("{:<22} {:>8}", "Override references", summary.overrides);
            println!("{:<22} {:>8}", "Bezels", summary.bezels);
            println!("{:<22} {:>8}", "Case materials", summary.case_materials);
            println!("{:<22} {:>8}", "Reference letters", summary.reference_letters);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Tsv | OutputFormat::Csv => {
            let rows = [
                ("model_families", summary.model_families),
                ("distinct_codes", summary.distinct_codes),
                ("overrides", summary.overrides),
                ("bezels", summary.bezels),
                ("case_materials", summary.case_materials),
                ("reference_letters", summary.reference_letters),
            ];
            let mut out = delimited_writer(format);
            out.write_record(["table", "entries"])?;
            for (table, count) in rows {
                let count = count.to_string();
                out.write_record([table, count.as_str()])?;
            }
            out.flush()?;
        }
    }

    Ok(())
}

fn run_show(catalog: &ReferenceCatalog, kind: TableKind, format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        let json = match kind {
            TableKind::Families => serde_json::to_string_pretty(&catalog.model_families)?,
            TableKind::Overrides => serde_json::to_string_pretty(&catalog.overrides)?,
            TableKind::Bezels => serde_json::to_string_pretty(&catalog.bezels)?,
            TableKind::CaseMaterials => serde_json::to_string_pretty(&catalog.case_materials)?,
            TableKind::Letters => serde_json::to_string_pretty(&catalog.reference_letters)?,
        };
        println!("{json}");
        return Ok(());
    }

    let rows = table_rows(catalog, kind);

    if format == OutputFormat::Text {
        let [key, value] = kind.headers();
        let width = rows
            .iter()
            .map(|(k, _)| k.chars().count())
            .max()
            .unwrap_or(0)
            .max(key.len());
        println!("{key:<width$}  {value}");
        println!("{}", "-".repeat(width + 2 + value.len().max(20)));
        for (k, v) in &rows {
            println!("{k:<width$}  {}", truncate(v, 100));
        }
        println!("\n{} entries", rows.len());
        return Ok(());
    }

    let mut out = delimited_writer(format);
    out.write_record(kind.headers())?;
    for (k, v) in &rows {
        out.write_record([k, v])?;
    }
    out.flush()?;
    Ok(())
}

fn run_export(catalog: &ReferenceCatalog, output: &Path) -> anyhow::Result<()> {
    let json = catalog.to_json()?;
    std::fs::write(output, json)?;

    println!(
        "Exported {} model families and {} override references to {}",
        catalog.len(),
        catalog.override_reference_count(),
        output.display()
    );

    Ok(())
}

/// One `(key, value)` pair per table entry, in catalog order
fn table_rows(catalog: &ReferenceCatalog, kind: TableKind) -> Vec<(String, String)> {
    fn join<T: ToString>(items: &[T]) -> String {
        items.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
    }

    match kind {
        TableKind::Families => catalog
            .model_families
            .iter()
            .map(|f| (f.name.to_string(), join(&f.codes)))
            .collect(),
        TableKind::Overrides => catalog
            .overrides
            .iter()
            .map(|o| (o.model.to_string(), join(&o.references)))
            .collect(),
        TableKind::Bezels => catalog
            .bezels
            .iter()
            .map(|b| (b.code.to_string(), b.name.clone()))
            .collect(),
        TableKind::CaseMaterials => catalog
            .case_materials
            .iter()
            .map(|c| (c.code.to_string(), c.name.clone()))
            .collect(),
        TableKind::Letters => catalog
            .reference_letters
            .iter()
            .map(|l| (l.letters.clone(), l.meaning.clone()))
            .collect(),
    }
}

fn delimited_writer(format: OutputFormat) -> csv::Writer<io::Stdout> {
    let delimiter = if format == OutputFormat::Tsv { b'\t' } else { b',' };
    csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(io::stdout())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{kept}...")
    }
}
