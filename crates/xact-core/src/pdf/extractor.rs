//! PDF text extraction.
//!
//! lopdf loads, decrypts and counts pages; page text comes from
//! pdf-extract, with lopdf's content stream text as the fallback.

use lopdf::Document;
use tracing::{debug, warn};

use super::{PdfProcessor, PdfType, Result};
use crate::error::PdfError;
use crate::models::config::PdfConfig;

/// PDF text extractor backed by lopdf and pdf-extract.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    min_text_length: usize,
    text_fallback: bool,
}

/// Text of a single PDF page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfPage {
    /// Page number (1-indexed).
    pub number: u32,
    /// Newline-delimited text in reading order.
    pub text: String,
}

/// Classify a document by how much text its pages carry.
pub fn analyze_pages(pages: &[PdfPage], min_text_length: usize) -> PdfType {
    let total: usize = pages.iter().map(|p| p.text.trim().len()).sum();
    if total > min_text_length {
        PdfType::Text
    } else {
        PdfType::Empty
    }
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            min_text_length: 50,
            text_fallback: true,
        }
    }

    /// Create an extractor from PDF configuration.
    pub fn from_config(config: &PdfConfig) -> Self {
        Self {
            min_text_length: config.min_text_length,
            text_fallback: config.text_fallback,
            ..Self::new()
        }
    }

    fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or_else(|| PdfError::Parse("No document loaded".to_string()))
    }

    /// Layout-aware text of every page, in page order.
    ///
    /// pdf-extract follows text positioning, so each visual line of the
    /// page comes out as its own line. `None` when it cannot read the
    /// document.
    fn layout_pages(&self) -> Option<Vec<String>> {
        match pdf_extract::extract_text_from_mem_by_pages(&self.raw_data) {
            Ok(pages) => Some(pages),
            Err(e) => {
                warn!("Layout text extraction failed: {}", e);
                None
            }
        }
    }

    /// Content stream text of one page.
    ///
    /// lopdf only breaks lines at the end of a text object, so this is
    /// used when layout extraction fails or yields nothing.
    fn lopdf_page_text(&self, page: u32) -> Result<String> {
        if !self.text_fallback {
            return Ok(String::new());
        }
        self.document()?
            .extract_text(&[page])
            .map_err(|e| PdfError::TextExtraction(format!("page {}: {}", page, e)))
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // Save decrypted document to raw_data for pdf_extract
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn analyze(&self) -> PdfType {
        let pages = self.extract_pages().unwrap_or_default();
        let pdf_type = analyze_pages(&pages, self.min_text_length);
        debug!("PDF analysis: {} pages -> {:?}", pages.len(), pdf_type);
        pdf_type
    }

    fn extract_text(&self) -> Result<String> {
        pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self.document()?;
        let index = doc
            .get_pages()
            .keys()
            .position(|&number| number == page)
            .ok_or(PdfError::InvalidPage(page))?;

        match self.layout_pages() {
            Some(mut pages) if index < pages.len() && !pages[index].trim().is_empty() => {
                Ok(pages.swap_remove(index))
            }
            _ => self.lopdf_page_text(page),
        }
    }

    fn extract_pages(&self) -> Result<Vec<PdfPage>> {
        let doc = self.document()?;
        let numbers: Vec<u32> = doc.get_pages().keys().copied().collect();

        let layout = self
            .layout_pages()
            .filter(|pages| pages.len() == numbers.len());
        if layout.is_none() {
            debug!("Page-wise layout text unavailable, using content stream text");
        }

        let pages = numbers
            .iter()
            .enumerate()
            .map(|(index, &number)| {
                let text = match layout.as_ref().map(|pages| &pages[index]) {
                    Some(text) if !text.trim().is_empty() => text.clone(),
                    _ => self.lopdf_page_text(number).unwrap_or_else(|e| {
                        debug!("No text from page {}: {}", number, e);
                        String::new()
                    }),
                };
                PdfPage { number, text }
            })
            .collect();

        Ok(pages)
    }
}
