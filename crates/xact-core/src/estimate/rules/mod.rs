//! Rule-based building blocks for Xactimate line item extraction.

pub mod amounts;
pub mod boundary;
pub mod matcher;
pub mod patterns;
pub mod trades;

pub use amounts::{format_amount, parse_amount};
pub use boundary::{is_record_start, is_skip_line, BlockScanner, CandidateBlock};
pub use matcher::{match_record, FieldLayout, PatternDescriptor, RecordMatch, PATTERN_BANK};
pub use trades::{classify, OTHER, TRADE_KEYWORDS};
