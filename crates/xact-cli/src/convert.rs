//! Convert an estimate PDF into a workbook, CSV or JSON file.

use std::fs;
use std::path::Path;
use std::time::Instant;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use xact_core::models::config::XactConfig;
use xact_core::report::{EstimateReport, XlsxWriter};
use xact_core::{Diagnostic, ExtractionResult, ExtractionStatus};

use crate::summary;

/// Output file formats, chosen by extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Xlsx,
    Csv,
    Json,
}

impl OutputFormat {
    /// `.csv` and `.json` are recognized; anything else gets a workbook.
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "csv" => Self::Csv,
            "json" => Self::Json,
            _ => Self::Xlsx,
        }
    }
}

pub fn run(input: &Path, output: &Path, config: &XactConfig) -> anyhow::Result<()> {
    let start = Instant::now();

    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    info!("Processing file: {}", input.display());

    let data = fs::read(input)?;

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} pages")?
            .progress_chars("##-"),
    );
    let result = xact_core::extract_pdf_with_progress(&data, config, |done, total| {
        pb.set_length(total as u64);
        pb.set_position(done as u64);
    });
    pb.finish_and_clear();
    let result = result?;

    for diagnostic in &result.diagnostics {
        match diagnostic {
            Diagnostic::UnmatchedCandidate { .. } | Diagnostic::InvalidAmount { .. } => {
                warn!("{}", diagnostic)
            }
            _ => debug!("{}", diagnostic),
        }
    }

    if matches!(result.status(), ExtractionStatus::NoItems) {
        warn!("No line items extracted.");
        return Ok(());
    }

    let report = EstimateReport::build(&result.items, config.report.budget_ratio)?;

    match OutputFormat::from_path(output) {
        OutputFormat::Csv => write_csv(&result, output)?,
        OutputFormat::Json => fs::write(output, serde_json::to_string_pretty(&result)?)?,
        OutputFormat::Xlsx => XlsxWriter::from_config(&config.report).write(&report, output)?,
    }

    println!(
        "{} Output written to {}",
        style("✓").green(),
        output.display()
    );
    summary::print(&report);

    debug!("Total processing time: {:?}", start.elapsed());
    Ok(())
}

fn write_csv(result: &ExtractionResult, output: &Path) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(output)?;
    for row in result.rows() {
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}
