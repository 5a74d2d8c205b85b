//! Xactimate line item extraction module.

mod parser;
pub mod rules;

pub use parser::{
    Diagnostic, EstimateParser, ExtractionResult, ExtractionStatus, PageExtraction,
};

use crate::error::ExtractionError;
use crate::pdf::PdfPage;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for estimate line item extractors.
pub trait EstimateExtractor {
    /// Extract line items from a document's pages, in page order.
    fn extract_pages(&self, pages: &[PdfPage]) -> Result<ExtractionResult>;

    /// Extract line items from plain text treated as a single page.
    fn extract_from_text(&self, text: &str) -> Result<ExtractionResult>;
}
