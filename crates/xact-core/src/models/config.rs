//! Configuration structures for the conversion pipeline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration for the xact pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct XactConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Line item extraction configuration.
    pub extraction: ExtractionConfig,

    /// Report configuration.
    pub report: ReportConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Minimum text length to consider the PDF text-based.
    pub min_text_length: usize,

    /// Use content stream text for pages the layout extraction leaves blank.
    pub text_fallback: bool,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            min_text_length: 50,
            text_fallback: true,
        }
    }
}

/// Line item extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Abort on an unparseable amount instead of dropping the record.
    pub strict_amounts: bool,

    /// Maximum characters of an unmatched candidate kept for diagnostics.
    pub unmatched_preview_len: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            strict_amounts: true,
            unmatched_preview_len: 200,
        }
    }
}

/// Report configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Share of RCV budgeted for the job.
    pub budget_ratio: Decimal,

    /// Name of the sheet listing every line item.
    pub master_sheet: String,

    /// Name of the per-trade summary sheet.
    pub totals_sheet: String,

    /// Title of the RCV pie chart.
    pub chart_title: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            budget_ratio: Decimal::new(6, 1),
            master_sheet: "Master".to_string(),
            totals_sheet: "Totals".to_string(),
            chart_title: "RCV by Trade".to_string(),
        }
    }
}

impl XactConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
