//! CLI application converting Xactimate estimate PDFs into trade workbooks.

mod config;
mod convert;
mod summary;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Xactimate estimate parser - Sort estimate line items into trades
#[derive(Parser)]
#[command(name = "xactparse")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Xactimate estimate PDF
    pdf_file: PathBuf,

    /// Output file (.xlsx workbook, .csv rows or .json extraction result)
    output_file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging is controlled by RUST_LOG only
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = config::load()?;
    convert::run(&cli.pdf_file, &cli.output_file, &config)
}
