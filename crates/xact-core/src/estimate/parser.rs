//! Line item extraction pipeline over estimate pages.

use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::ExtractionError;
use crate::models::config::ExtractionConfig;
use crate::models::estimate::{LineItem, HEADERS};
use crate::pdf::PdfPage;

use super::rules::{match_record, BlockScanner};
use super::{EstimateExtractor, Result};

/// A recoverable anomaly found while extracting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A numbered block that no template recognized.
    UnmatchedCandidate { page: u32, line: usize, text: String },
    /// A page without extractable text.
    EmptyPage { page: u32 },
    /// A record dropped because an amount did not parse (lenient mode).
    InvalidAmount {
        page: u32,
        line: usize,
        field: String,
        value: String,
    },
    /// An extracted item whose values do not add up.
    ValidationIssue { page: u32, line: usize, issue: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnmatchedCandidate { page, line, text } => {
                write!(f, "page {page}, line {line}: no match: {text:?}")
            }
            Self::EmptyPage { page } => write!(f, "page {page}: no extractable text"),
            Self::InvalidAmount {
                page,
                line,
                field,
                value,
            } => write!(f, "page {page}, line {line}: invalid {field} {value:?}"),
            Self::ValidationIssue { page, line, issue } => {
                write!(f, "page {page}, line {line}: {issue}")
            }
        }
    }
}

/// Whether an extraction produced anything to report on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStatus {
    /// At least one line item was extracted.
    Extracted(usize),
    /// Nothing was extracted; parsing most likely failed for this document.
    NoItems,
}

/// Items and diagnostics from a single page.
#[derive(Debug, Clone, Default)]
pub struct PageExtraction {
    pub page: u32,
    pub items: Vec<LineItem>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Result of extracting line items from a document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Line items in page, then line order.
    pub items: Vec<LineItem>,
    /// Recovered anomalies, in the order they were found.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of pages looked at, including empty ones.
    pub pages_scanned: u32,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl ExtractionResult {
    /// Concatenate per-page results in page order.
    pub fn from_pages(mut pages: Vec<PageExtraction>, processing_time_ms: u64) -> Self {
        pages.sort_by_key(|p| p.page);

        let mut result = Self {
            pages_scanned: pages.len() as u32,
            processing_time_ms,
            ..Self::default()
        };
        for page in pages {
            result.items.extend(page.items);
            result.diagnostics.extend(page.diagnostics);
        }
        result
    }

    /// Distinguish an empty extraction from a successful one.
    pub fn status(&self) -> ExtractionStatus {
        if self.items.is_empty() {
            ExtractionStatus::NoItems
        } else {
            ExtractionStatus::Extracted(self.items.len())
        }
    }

    /// Unmatched candidates only.
    pub fn unmatched(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::UnmatchedCandidate { .. }))
    }

    /// The header row followed by one row per item.
    pub fn rows(&self) -> Vec<Vec<String>> {
        std::iter::once(HEADERS.iter().map(|h| h.to_string()).collect())
            .chain(self.items.iter().map(|item| item.to_row().to_vec()))
            .collect()
    }
}

/// Rule-based line item parser for Xactimate estimates.
pub struct EstimateParser {
    /// Abort on an unparseable amount instead of dropping the record.
    strict_amounts: bool,
    /// Maximum characters of unmatched text kept in diagnostics.
    preview_len: usize,
}

impl EstimateParser {
    /// Create a new parser with default settings.
    pub fn new() -> Self {
        Self {
            strict_amounts: true,
            preview_len: 200,
        }
    }

    /// Create a parser from extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new()
            .with_strict_amounts(config.strict_amounts)
            .with_preview_len(config.unmatched_preview_len)
    }

    /// Set strict amount handling.
    pub fn with_strict_amounts(mut self, strict: bool) -> Self {
        self.strict_amounts = strict;
        self
    }

    /// Set the unmatched preview length.
    pub fn with_preview_len(mut self, len: usize) -> Self {
        self.preview_len = len;
        self
    }

    /// Extract line items from one page of text.
    pub fn parse_page(&self, page: u32, text: &str) -> Result<PageExtraction> {
        let mut extraction = PageExtraction {
            page,
            ..PageExtraction::default()
        };

        if text.trim().is_empty() {
            debug!("Page {} has no extractable text, skipping", page);
            extraction.diagnostics.push(Diagnostic::EmptyPage { page });
            return Ok(extraction);
        }

        let mut scanner = BlockScanner::new(text);

        while let Some(block) = scanner.next_block() {
            let line = block.line_number();

            match match_record(&block.text) {
                Ok(Some(record)) => {
                    if record.has_trailing_condition() {
                        scanner.skip_condition_line();
                    }

                    let item = record.into_line_item();
                    for issue in item.validate() {
                        extraction
                            .diagnostics
                            .push(Diagnostic::ValidationIssue { page, line, issue });
                    }
                    extraction.items.push(item);
                }
                Ok(None) => {
                    debug!("No match on page {} line {}: {:?}", page, line, block.text);
                    extraction.diagnostics.push(Diagnostic::UnmatchedCandidate {
                        page,
                        line,
                        text: block.text.chars().take(self.preview_len).collect(),
                    });
                }
                Err(ExtractionError::Parse { field, value }) if !self.strict_amounts => {
                    warn!(
                        "Dropping record on page {} line {}: invalid {} {:?}",
                        page, line, field, value
                    );
                    extraction.diagnostics.push(Diagnostic::InvalidAmount {
                        page,
                        line,
                        field,
                        value,
                    });
                }
                Err(err) => {
                    return Err(ExtractionError::AtRecord {
                        page,
                        line,
                        source: Box::new(err),
                    });
                }
            }
        }

        debug!(
            "Page {}: {} items, {} diagnostics",
            page,
            extraction.items.len(),
            extraction.diagnostics.len()
        );

        Ok(extraction)
    }
}

impl Default for EstimateParser {
    fn default() -> Self {
        Self::new()
    }
}

impl EstimateExtractor for EstimateParser {
    fn extract_pages(&self, pages: &[PdfPage]) -> Result<ExtractionResult> {
        let start = Instant::now();

        let extractions = pages
            .iter()
            .map(|page| self.parse_page(page.number, &page.text))
            .collect::<Result<Vec<_>>>()?;

        let result = ExtractionResult::from_pages(extractions, start.elapsed().as_millis() as u64);

        info!(
            "Extracted {} line items from {} pages ({} unmatched)",
            result.items.len(),
            result.pages_scanned,
            result.unmatched().count()
        );

        Ok(result)
    }

    fn extract_from_text(&self, text: &str) -> Result<ExtractionResult> {
        self.extract_pages(&[PdfPage {
            number: 1,
            text: text.to_string(),
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use crate::models::estimate::CarrierTemplate;

    #[test]
    fn test_single_line_record() {
        let parser = EstimateParser::new();
        let page = parser
            .parse_page(
                1,
                "1. Remove laminate flooring 13.49SQ 7.27 0.00 9.80 107.87 9/NA Avg. 0% (0.00) 107.87",
            )
            .unwrap();

        assert_eq!(page.items.len(), 1);
        let item = &page.items[0];
        assert_eq!(item.description, "1. Remove laminate flooring");
        assert_eq!(item.trade, "Laminate");
        assert_eq!(item.quantity_unit, "13.49SQ");
        assert_eq!(item.unit_price, dec!(7.27));
        assert_eq!(item.tax, dec!(0.00));
        assert_eq!(item.overhead_profit, dec!(9.80));
        assert_eq!(item.rcv, dec!(107.87));
        assert_eq!(item.depreciation, dec!(0.00));
        assert_eq!(item.acv, dec!(107.87));
        assert!(page.diagnostics.is_empty());
    }

    #[test]
    fn test_three_line_record() {
        let text = "2. Remove & replace carpet\n\
                    19.67SQ 433.28 310.68 1,766.66 10,599.96 8/30 yrs (2,826.65) 7,773.31\n\
                    Avg. 26.67%\n\
                    3. Remove carpet pad 19.67SQ 0.50 0.00 1.97 11.81 (0.00) 11.81";
        let page = EstimateParser::new().parse_page(4, text).unwrap();

        assert_eq!(page.items.len(), 2);
        let carpet = &page.items[0];
        assert_eq!(carpet.description, "2. Remove & replace carpet");
        assert_eq!(carpet.template, CarrierTemplate::ConditionOnNextLine);
        assert_eq!(carpet.trade, "Carpet");
        assert_eq!(carpet.acv, dec!(7773.31));
        assert!(!carpet.description.contains("Avg."));
        assert_eq!(page.items[1].description, "3. Remove carpet pad");
        assert!(page.diagnostics.is_empty());
    }

    #[test]
    fn test_unmatched_candidate() {
        let page = EstimateParser::new()
            .parse_page(2, "Notes\n7. Unusual format $$$ ??? 1 2 3\n")
            .unwrap();

        assert!(page.items.is_empty());
        assert_eq!(
            page.diagnostics,
            vec![Diagnostic::UnmatchedCandidate {
                page: 2,
                line: 2,
                text: "7. Unusual format $$$ ??? 1 2 3".to_string(),
            }]
        );
    }

    #[test]
    fn test_unmatched_preview_truncated() {
        let long = format!("9. {}", "word ".repeat(100));
        let page = EstimateParser::new()
            .with_preview_len(20)
            .parse_page(1, &long)
            .unwrap();

        match &page.diagnostics[0] {
            Diagnostic::UnmatchedCandidate { text, .. } => assert_eq!(text.chars().count(), 20),
            other => panic!("unexpected diagnostic: {other}"),
        }
    }

    #[test]
    fn test_empty_page() {
        let page = EstimateParser::new().parse_page(3, "  \n\n").unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.diagnostics, vec![Diagnostic::EmptyPage { page: 3 }]);
    }

    #[test]
    fn test_invalid_amount_strict() {
        let text = "8. Drywall 1.00EA 1.2.3 0.00 0.00 10.00 (0.00) 10.00";
        let err = EstimateParser::new().parse_page(5, text).unwrap_err();

        match err {
            ExtractionError::AtRecord { page, line, source } => {
                assert_eq!((page, line), (5, 1));
                assert!(matches!(*source, ExtractionError::Parse { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_amount_lenient() {
        let text = "8. Drywall 1.00EA 1.2.3 0.00 0.00 10.00 (0.00) 10.00\n\
                    9. Drywall patch 1.00EA 10.00 0.00 0.00 10.00 (0.00) 10.00";
        let page = EstimateParser::new()
            .with_strict_amounts(false)
            .parse_page(1, text)
            .unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].description, "9. Drywall patch");
        assert_eq!(
            page.diagnostics,
            vec![Diagnostic::InvalidAmount {
                page: 1,
                line: 1,
                field: "unit_price".to_string(),
                value: "1.2.3".to_string(),
            }]
        );
    }

    #[test]
    fn test_validation_issue_reported_not_enforced() {
        let text = "4. Drywall patch 1.00EA 10.00 0.00 0.00 10.00 (2.00) 10.00";
        let page = EstimateParser::new().parse_page(1, text).unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].acv, dec!(10.00));
        assert!(matches!(
            page.diagnostics.as_slice(),
            [Diagnostic::ValidationIssue { line: 1, .. }]
        ));
    }

    #[test]
    fn test_status_and_rows() {
        let parser = EstimateParser::new();

        let empty = parser.extract_from_text("").unwrap();
        assert_eq!(empty.status(), ExtractionStatus::NoItems);
        assert_eq!(empty.rows().len(), 1);

        let result = parser
            .extract_from_text("1. Drywall patch 1.00EA 10.00 0.00 0.00 10.00 (0.00) 10.00")
            .unwrap();
        assert_eq!(result.status(), ExtractionStatus::Extracted(1));

        let rows = result.rows();
        assert_eq!(rows[0], HEADERS.to_vec());
        assert_eq!(
            rows[1],
            vec![
                "1. Drywall patch", "Drywall", "1.00EA", "10.00", "0.00", "0.00", "10.00",
                "0.00", "10.00",
            ]
        );
    }

    #[test]
    fn test_from_pages_orders_by_page() {
        let parser = EstimateParser::new();
        let second = parser
            .parse_page(2, "2. Drywall patch 1.00EA 10.00 0.00 0.00 10.00 (0.00) 10.00")
            .unwrap();
        let first = parser
            .parse_page(1, "1. Paint walls 1.00EA 10.00 0.00 0.00 10.00 (0.00) 10.00")
            .unwrap();

        let result = ExtractionResult::from_pages(vec![second, first], 0);
        assert_eq!(result.pages_scanned, 2);
        assert_eq!(result.items[0].description, "1. Paint walls");
        assert_eq!(result.items[1].description, "2. Drywall patch");
    }
}
