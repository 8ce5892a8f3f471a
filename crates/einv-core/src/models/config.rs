//! Configuration structures for extraction and report output.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Main configuration for einv.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EinvConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Report output configuration.
    pub report: ReportConfig,
}

/// Strings returned in place of a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Returned when the record has no encoded invoice.
    pub missing_payload_text: String,

    /// Returned when a line has no element for the requested amount.
    pub missing_amount_text: String,

    /// Returned when the invoice has no `cbc:InvoiceTypeCode`.
    pub code_not_found_text: String,

    /// Prefix for every other failure.
    pub error_prefix: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            missing_payload_text: "Invoice data not available".to_string(),
            missing_amount_text: "0.0".to_string(),
            code_not_found_text: "Code not found".to_string(),
            error_prefix: "Error processing invoice".to_string(),
        }
    }
}

/// Report output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Currency used when a record does not name one.
    pub default_currency: String,

    /// Hours added to the invoice timestamp before it is printed (KSA is UTC+3).
    pub utc_offset_hours: i64,

    /// Separator between the parts of the report filename.
    pub filename_separator: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            default_currency: "SAR".to_string(),
            utc_offset_hours: 3,
            filename_separator: " - ".to_string(),
        }
    }
}

impl EinvConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
