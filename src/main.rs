use clap::Parser;
use tracing_subscriber::EnvFilter;

mod catalog;
mod cleaning;
mod cli;
mod core;
mod matching;
mod parsing;
mod utils;
mod web;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("watch_ref=debug,info")
    } else {
        EnvFilter::new("watch_ref=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Decode(args) => {
            cli::decode::run(args, cli.format, cli.catalog, cli.verbose)?;
        }
        cli::Commands::Batch(args) => {
            cli::batch::run(args, cli.format, cli.catalog, cli.verbose)?;
        }
        cli::Commands::Clean(args) => {
            cli::clean::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Catalog(args) => {
            cli::catalog::run(args, cli.format, cli.catalog, cli.verbose)?;
        }
        cli::Commands::Serve(args) => {
            web::server::run(args, cli.catalog)?;
        }
    }

    Ok(())
}
