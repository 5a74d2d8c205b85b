//! Core library for turning Xactimate estimate PDFs into trade workbooks.
//!
//! This crate provides:
//! - PDF text extraction, page by page
//! - Line item extraction against six carrier layouts
//! - Keyword-based trade classification
//! - Per-trade totals, budget and Excel rendering

use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, warn};

pub mod error;
pub mod estimate;
pub mod models;
pub mod pdf;
pub mod report;

pub use error::{ExtractionError, PdfError, ReportError, Result, XactError};
pub use estimate::{
    Diagnostic, EstimateExtractor, EstimateParser, ExtractionResult, ExtractionStatus,
    PageExtraction,
};
pub use models::config::XactConfig;
pub use models::estimate::{CarrierTemplate, LineItem, HEADERS};
pub use pdf::{analyze_pages, PdfExtractor, PdfPage, PdfProcessor, PdfType};
pub use report::{ContractorSummary, CurrencyTotals, EstimateReport, TradeSheet, XlsxWriter};

/// Load a PDF from memory and extract its line items.
pub fn extract_pdf(data: &[u8], config: &XactConfig) -> Result<ExtractionResult> {
    extract_pdf_with_progress(data, config, |_, _| {})
}

/// Like [`extract_pdf`], calling `progress(done, total)` after each page.
pub fn extract_pdf_with_progress<F>(
    data: &[u8],
    config: &XactConfig,
    mut progress: F,
) -> Result<ExtractionResult>
where
    F: FnMut(usize, usize),
{
    let start = Instant::now();

    let mut extractor = PdfExtractor::from_config(&config.pdf);
    extractor.load(data)?;
    debug!("PDF has {} pages", extractor.page_count());

    let pages = extractor.extract_pages()?;
    if analyze_pages(&pages, config.pdf.min_text_length) == PdfType::Empty {
        warn!("Little or no extractable text; scanned estimates are not supported");
    }

    let parser = EstimateParser::from_config(&config.extraction);
    let mut extractions = Vec::with_capacity(pages.len());
    for (done, page) in pages.iter().enumerate() {
        extractions.push(parser.parse_page(page.number, &page.text)?);
        progress(done + 1, pages.len());
    }

    let result = ExtractionResult::from_pages(extractions, start.elapsed().as_millis() as u64);
    info!(
        "Extracted {} line items from {} pages ({} unmatched)",
        result.items.len(),
        result.pages_scanned,
        result.unmatched().count()
    );
    Ok(result)
}

/// Read a PDF file and extract its line items.
pub fn extract_file(path: &Path, config: &XactConfig) -> Result<ExtractionResult> {
    let data = std::fs::read(path)?;
    extract_pdf(&data, config)
}
