//! Common regex patterns for Xactimate estimate extraction.
//!
//! Every record template shares the same head (item number and description)
//! and amount tokens; they differ in which columns are present and in how the
//! age/life and condition annotations precede the depreciation.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Record boundaries
    pub static ref RECORD_START: Regex = Regex::new(
        r"^\d+\.\s"
    ).unwrap();

    /// A numeric field glued to a unit code at the start of a line, e.g. "19.67SQ ".
    pub static ref QUANTITY_UNIT_START: Regex = Regex::new(
        r"^[\d,.]+[A-Z]{2,4}\s"
    ).unwrap();

    /// A condition rating on its own line, e.g. "Avg. 26.67%".
    pub static ref CONDITION_LINE: Regex = Regex::new(
        r"^[A-Za-z.]+\s+\d+(?:\.\d+)?%"
    ).unwrap();

    /// Uppercase words ending in a bare unit code, e.g. "LIVING ROOM SF".
    pub static ref DIMENSION_HEADER: Regex = Regex::new(
        r"^\s*[A-Z\s]+(?:SF|LF|EA)\s*$"
    ).unwrap();

    // Record templates, in priority order

    /// NUMBER. DESCRIPTION QTY+UNIT PRICE TAX O&P RCV AGE/LIFE [yrs] COND PCT% [M] (DEPREC) ACV
    pub static ref WITH_AGE_LIFE: Regex = Regex::new(concat!(
        r"^(?P<number>\d+\.)\s+(?P<description>.+?)\s+",
        r"(?P<quantity>[\d,.]+)(?P<unit>[A-Z]{2,4})\s+",
        r"(?P<unit_price>[\d,.]+)\s+",
        r"(?P<tax>[\d,.]+)\s+",
        r"(?P<overhead>[\d,.]+)\s+",
        r"(?P<rcv>[\d,.]+)\s+",
        r"[\d/NA]+\s+(?:yrs?\s+)?",
        r"[A-Za-z.]+\s+\d+(?:\.\d+)?%\s+",
        r"(?:\[M\]\s+)?",
        r"\((?P<depreciation>[\d,.]+)\)\s+",
        r"(?P<acv>[\d,.]+)(?:\s|$)",
    )).unwrap();

    /// NUMBER. DESCRIPTION QTY+UNIT PRICE TAX O&P RCV AGE/LIFE [yrs] (DEPREC) ACV
    ///
    /// The condition rating follows on the next line.
    pub static ref CONDITION_ON_NEXT_LINE: Regex = Regex::new(concat!(
        r"^(?P<number>\d+\.)\s+(?P<description>.+?)\s+",
        r"(?P<quantity>[\d,.]+)(?P<unit>[A-Z]{2,4})\s+",
        r"(?P<unit_price>[\d,.]+)\s+",
        r"(?P<tax>[\d,.]+)\s+",
        r"(?P<overhead>[\d,.]+)\s+",
        r"(?P<rcv>[\d,.]+)\s+",
        r"[\d/NA]+\s+(?:yrs?\s+)?",
        r"\((?P<depreciation>[\d,.]+)\)\s+",
        r"(?P<acv>[\d,.]+)(?:\s|$)",
    )).unwrap();

    /// NUMBER. DESCRIPTION QTY+UNIT PRICE TAX RCV AGE/LIFE [yrs] COND PCT%|NA [M] (DEPREC) ACV
    pub static ref TAX_NO_OVERHEAD: Regex = Regex::new(concat!(
        r"^(?P<number>\d+\.)\s+(?P<description>.+?)\s+",
        r"(?P<quantity>[\d,.]+)(?P<unit>[A-Z]{2,4})\s+",
        r"(?P<unit_price>[\d,.]+)\s+",
        r"(?P<tax>[\d,.]+)\s+",
        r"(?P<rcv>[\d,.]+)\s+",
        r"[\d/NA]+\s+(?:yrs?\s+)?",
        r"[A-Za-z.]+\s+(?:\d+(?:\.\d+)?%|NA)\s+",
        r"(?:\[M\]\s+)?",
        r"[\(<](?P<depreciation>[\d,.]+)[\)>]\s+",
        r"(?P<acv>[\d,.]+)(?:\s|$)",
    )).unwrap();

    /// NUMBER. DESCRIPTION QTY+UNIT PRICE RCV AGE/LIFE [yrs] COND PCT%|NA [M] (DEPREC) ACV
    pub static ref NO_TAX_NO_OVERHEAD: Regex = Regex::new(concat!(
        r"^(?P<number>\d+\.)\s+(?P<description>.+?)\s+",
        r"(?P<quantity>[\d,.]+)(?P<unit>[A-Z]{2,4})\s+",
        r"(?P<unit_price>[\d,.]+)\s+",
        r"(?P<rcv>[\d,.]+)\s+",
        r"[\d/NA]+\s+(?:yrs?\s+)?",
        r"[A-Za-z.]+\s+(?:\d+(?:\.\d+)?%|NA)\s+",
        r"(?:\[M\]\s+)?",
        r"[\(<](?P<depreciation>[\d,.]+)[\)>]\s+",
        r"(?P<acv>[\d,.]+)(?:\s|$)",
    )).unwrap();

    /// NUMBER. DESCRIPTION QTY+UNIT PRICE TAX O&P RCV (DEPREC)|<DEPREC> ACV
    pub static ref SIMPLE: Regex = Regex::new(concat!(
        r"^(?P<number>\d+\.)\s+(?P<description>.+?)\s+",
        r"(?P<quantity>[\d,.]+)(?P<unit>[A-Z]{2,4})\s+",
        r"(?P<unit_price>[\d,.]+)\s+",
        r"(?P<tax>[\d,.]+)\s+",
        r"(?P<overhead>[\d,.]+)\s+",
        r"(?P<rcv>[\d,.]+)\s+",
        r"[\(<](?P<depreciation>[\d,.]+)[\)>]\s+",
        r"(?P<acv>[\d,.]+)(?:\s|$)",
    )).unwrap();

    /// NUMBER. DESCRIPTION QTY UNIT PRICE TAX O&P RCV <DEPREC> ACV
    pub static ref ANGLE_BRACKETS: Regex = Regex::new(concat!(
        r"^(?P<number>\d+\.)\s+(?P<description>.+?)\s+",
        r"(?P<quantity>[\d,.]+)\s+(?P<unit>[A-Z]{2,4})\s+",
        r"(?P<unit_price>[\d,.]+)\s+",
        r"(?P<tax>[\d,.]+)\s+",
        r"(?P<overhead>[\d,.]+)\s+",
        r"(?P<rcv>[\d,.]+)\s+",
        r"<(?P<depreciation>[\d,.]+)>\s+",
        r"(?P<acv>[\d,.]+)(?:\s|$)",
    )).unwrap();

    // Whitespace normalization
    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}
