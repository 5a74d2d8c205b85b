//! Error types for the xact-core library.

use thiserror::Error;

/// Main error type for the xact library.
#[derive(Error, Debug)]
pub enum XactError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Line item extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Report generation error.
    #[error("report error: {0}")]
    Report(#[from] ReportError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors related to line item extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A captured token is not a valid decimal amount.
    #[error("failed to parse {field}: {value:?}")]
    Parse { field: String, value: String },

    /// An error tied to a specific record in the document.
    #[error("record on page {page}, line {line}: {source}")]
    AtRecord {
        page: u32,
        line: usize,
        #[source]
        source: Box<ExtractionError>,
    },
}

/// Errors related to report generation.
#[derive(Error, Debug)]
pub enum ReportError {
    /// There are no line items to report on.
    #[error("no line items to report")]
    Empty,

    /// A total does not fit in a decimal.
    #[error("{0} total overflows")]
    Overflow(&'static str),

    /// The workbook could not be built or saved.
    #[error("workbook error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// Result type for the xact library.
pub type Result<T> = std::result::Result<T, XactError>;
