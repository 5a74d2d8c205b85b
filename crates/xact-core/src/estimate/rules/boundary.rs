//! Line boundary detection: grouping a page's lines into candidate records.

use super::patterns::{CONDITION_LINE, DIMENSION_HEADER, QUANTITY_UNIT_START, RECORD_START};

const TOTAL_MARKERS: &[&str] = &["total:", "subtotal:", "grand total", "line item total"];

const SECTION_MARKERS: &[&str] = &[
    "**contents**",
    "**claim info**",
    "**summary**",
    "estimate summary",
    "adjuster summary",
];

const RECEIPT_MARKERS: &[&str] = &[
    "receipts must be",
    "items on receipts",
    "the receipt should contain",
    "additional documentation",
];

/// Whether a line is noise that can never belong to a record.
///
/// Matches dimension lines, totals, section headers, receipt instructions
/// and bare dimension headers such as "KITCHEN SF".
pub fn is_skip_line(line: &str) -> bool {
    let lower = line.to_lowercase();

    lower.contains("dimension")
        || TOTAL_MARKERS.iter().any(|m| lower.contains(m))
        || SECTION_MARKERS.iter().any(|m| lower.contains(m))
        || RECEIPT_MARKERS.iter().any(|m| lower.contains(m))
        || DIMENSION_HEADER.is_match(line)
}

/// Whether a line opens a new record ("12. ...").
pub fn is_record_start(line: &str) -> bool {
    RECORD_START.is_match(line)
}

/// A record's joined text and the lines it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateBlock {
    /// Consumed lines joined with single spaces.
    pub text: String,
    /// Index of the opening line.
    pub start: usize,
    /// Index one past the last consumed line.
    pub end: usize,
}

impl CandidateBlock {
    /// 1-indexed line number of the opening line.
    pub fn line_number(&self) -> usize {
        self.start + 1
    }
}

/// Scans a page's lines and yields candidate record blocks in order.
///
/// The scanner owns the resume position, so a caller that recognizes a
/// three-line record can ask it to step over the trailing condition line
/// with [`BlockScanner::skip_condition_line`] before asking for the next
/// block.
pub struct BlockScanner<'a> {
    lines: Vec<&'a str>,
    cursor: usize,
}

impl<'a> BlockScanner<'a> {
    /// Create a scanner over the lines of a page's text.
    pub fn new(text: &'a str) -> Self {
        Self::from_lines(text.lines())
    }

    /// Create a scanner over pre-split lines.
    pub fn from_lines<I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            lines: lines.into_iter().map(str::trim).collect(),
            cursor: 0,
        }
    }

    /// Index of the next line to be scanned.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Advance to the next record opening and return its block.
    pub fn next_block(&mut self) -> Option<CandidateBlock> {
        while self.cursor < self.lines.len() {
            let start = self.cursor;
            let line = self.lines[start];

            if is_skip_line(line) || !is_record_start(line) {
                self.cursor += 1;
                continue;
            }

            let end = self.block_end(start);
            let text = self.lines[start..end].join(" ");
            self.cursor = end;

            return Some(CandidateBlock { text, start, end });
        }

        None
    }

    /// Consume a condition rating line ("Avg. 26.67%") at the resume
    /// position, then any blank lines after it.
    ///
    /// Returns the number of lines consumed.
    pub fn skip_condition_line(&mut self) -> usize {
        let before = self.cursor;

        if self
            .lines
            .get(self.cursor)
            .is_some_and(|line| CONDITION_LINE.is_match(line))
        {
            self.cursor += 1;
        }

        while self.lines.get(self.cursor).is_some_and(|line| line.is_empty()) {
            self.cursor += 1;
        }

        self.cursor - before
    }

    /// Find the exclusive end of the record opened at `start`.
    fn block_end(&self, start: usize) -> usize {
        // Amounts on the next line: exactly two lines.
        if self
            .lines
            .get(start + 1)
            .is_some_and(|next| QUANTITY_UNIT_START.is_match(next))
        {
            return start + 2;
        }

        let mut end = start + 1;
        while let Some(next) = self.lines.get(end) {
            if next.is_empty() || is_record_start(next) || is_skip_line(next) {
                break;
            }
            end += 1;
        }
        end
    }
}
