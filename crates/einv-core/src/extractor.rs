//! Reading business terms out of a base64-encoded UBL invoice.
//!
//! Every lookup decodes and parses the payload afresh; nothing is cached
//! between calls, so one extractor can be shared across threads.
//!
//! Each operation comes in two forms. The plain form returns a
//! `Result<_, ExtractionError>` for callers that need to branch on the
//! failure. The `_text` form never fails and renders every outcome as the
//! string a report would print.

use tracing::{debug, warn};

use crate::error::ExtractionError;
use crate::models::config::ExtractionConfig;
use crate::terms::LineTerm;
use crate::ubl::{
    self, FieldPath, INVOICE_TYPE_CODE, TAX_CATEGORY, TAX_EXEMPTION_REASON, TAX_SUBTOTAL,
    TAX_TOTAL,
};

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Outcome of walking a field path under a matched line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Text of the final element, verbatim.
    Text(String),
    /// Some step of the path has no matching child.
    Absent,
}

/// Reads line and invoice level business terms.
#[derive(Debug, Clone, Default)]
pub struct InvoiceFieldExtractor {
    config: ExtractionConfig,
}

impl InvoiceFieldExtractor {
    /// Create an extractor with the default sentinel strings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with custom sentinel strings.
    pub fn with_config(config: ExtractionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Resolve `path` under the line whose `cbc:ID` equals `id`.
    pub fn extract(&self, encoded: Option<&str>, id: &str, path: &FieldPath) -> Result<FieldValue> {
        let xml = ubl::decode_payload(encoded)?;
        let doc = ubl::parse_document(&xml)?;

        let line = ubl::find_id_parent(&doc, id).inspect_err(|e| warn!("{}", e))?;
        let value = match ubl::descend(line, path) {
            Some(node) => FieldValue::Text(node.text().unwrap_or_default().to_string()),
            None => {
                debug!("No {} under line {}", path, id);
                FieldValue::Absent
            }
        };

        Ok(value)
    }

    /// [`extract`](Self::extract) rendered for display.
    pub fn extract_text(&self, encoded: Option<&str>, id: &str, path: &FieldPath) -> String {
        match self.extract(encoded, id, path) {
            Ok(FieldValue::Text(text)) => text,
            Ok(FieldValue::Absent) => self.config.missing_amount_text.clone(),
            Err(e) => self.render_error(&e),
        }
    }

    /// Read a known line term.
    pub fn line_term(&self, encoded: Option<&str>, id: &str, term: LineTerm) -> Result<FieldValue> {
        self.extract(encoded, id, &term.path())
    }

    /// [`line_term`](Self::line_term) rendered for display.
    pub fn line_term_text(&self, encoded: Option<&str>, id: &str, term: LineTerm) -> String {
        self.extract_text(encoded, id, &term.path())
    }

    /// BT-131, the line net amount.
    pub fn line_extension_amount(&self, encoded: Option<&str>, id: &str) -> String {
        self.line_term_text(encoded, id, LineTerm::LineExtensionAmount)
    }

    /// BT-136, the line allowance amount.
    pub fn allowance_charge_amount(&self, encoded: Option<&str>, id: &str) -> String {
        self.line_term_text(encoded, id, LineTerm::AllowanceAmount)
    }

    /// KSA-11, the line VAT amount.
    pub fn line_tax_amount(&self, encoded: Option<&str>, id: &str) -> String {
        self.line_term_text(encoded, id, LineTerm::TaxAmount)
    }

    /// KSA-12, the line amount with VAT.
    pub fn line_rounding_amount(&self, encoded: Option<&str>, id: &str) -> String {
        self.line_term_text(encoded, id, LineTerm::RoundingAmount)
    }

    /// `name` attribute of the first `cbc:InvoiceTypeCode`.
    ///
    /// `Ok(None)` when the element is missing; an element without the
    /// attribute yields an empty string.
    pub fn invoice_type_code(&self, encoded: Option<&str>) -> Result<Option<String>> {
        let xml = ubl::decode_payload(encoded)?;
        let doc = ubl::parse_document(&xml)?;

        Ok(ubl::find_first(&doc, INVOICE_TYPE_CODE)
            .map(|node| node.attribute("name").unwrap_or_default().to_string()))
    }

    pub fn invoice_type_code_text(&self, encoded: Option<&str>) -> String {
        match self.invoice_type_code(encoded) {
            Ok(Some(code)) => code,
            Ok(None) => self.config.code_not_found_text.clone(),
            Err(e) => self.render_error(&e),
        }
    }

    /// BT-120, the first VAT exemption reason text in the invoice.
    pub fn exemption_reason(&self, encoded: Option<&str>) -> Result<Option<String>> {
        const PATH: FieldPath = FieldPath::new(&[TAX_SUBTOTAL, TAX_CATEGORY, TAX_EXEMPTION_REASON]);

        let xml = ubl::decode_payload(encoded)?;
        let doc = ubl::parse_document(&xml)?;

        Ok(doc
            .descendants()
            .filter(|n| TAX_TOTAL.matches(n))
            .find_map(|total| ubl::descend(total, &PATH))
            .map(|node| node.text().unwrap_or_default().to_string()))
    }

    pub fn exemption_reason_text(&self, encoded: Option<&str>) -> String {
        match self.exemption_reason(encoded) {
            Ok(reason) => reason.unwrap_or_default(),
            Err(e) => self.render_error(&e),
        }
    }

    /// Render an error the way the `_text` operations do.
    pub fn render_error(&self, err: &ExtractionError) -> String {
        match err {
            ExtractionError::MissingPayload => self.config.missing_payload_text.clone(),
            other => format!("{}: {}", self.config.error_prefix, other),
        }
    }
}
