//! Invoice record supplied by the host system.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::extractor::InvoiceFieldExtractor;
use crate::models::config::ReportConfig;
use crate::report::report_base_filename;
use crate::tax::tax_amount;
use crate::terms::LineTerm;

/// A line as the host system stores it, independent of the XML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLine {
    /// Unit price before VAT.
    pub price_unit: Decimal,

    pub quantity: Decimal,

    /// VAT percentages attached to the line; only the first applies.
    #[serde(default)]
    pub tax_rates: Vec<Decimal>,
}

/// An invoice record with its base64-encoded UBL document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Host record identifier.
    pub id: String,

    /// Seller VAT registration number.
    #[serde(default)]
    pub company_vat: String,

    /// Issue timestamp, UTC.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_datetime: Option<NaiveDateTime>,

    /// Report currency code; falls back to the configured default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Base64 UBL XML.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoded_invoice: Option<String>,

    /// Values of the `cbc:ID` of each invoice line, in print order.
    #[serde(default)]
    pub line_ids: Vec<String>,

    #[serde(default)]
    pub lines: Vec<InvoiceLine>,
}

/// Business terms for one invoice line, as printed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineReport {
    pub id: String,
    #[serde(rename = "BT-131")]
    pub line_extension_amount: String,
    #[serde(rename = "BT-136")]
    pub allowance_amount: String,
    #[serde(rename = "KSA-11")]
    pub tax_amount: String,
    #[serde(rename = "KSA-12")]
    pub rounding_amount: String,
}

/// Everything a printed invoice pulls from the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceReport {
    pub id: String,
    pub invoice_type_code: String,
    #[serde(rename = "BT-120")]
    pub exemption_reason: String,
    pub currency: String,
    /// VAT total over the host lines; `None` when it overflows.
    pub tax_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    pub lines: Vec<LineReport>,
}

impl InvoiceRecord {
    /// Load a record from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn encoded(&self) -> Option<&str> {
        self.encoded_invoice.as_deref()
    }

    pub fn currency_or<'a>(&'a self, config: &'a ReportConfig) -> &'a str {
        self.currency.as_deref().unwrap_or(&config.default_currency)
    }

    /// VAT total over the record's lines, `None` on overflow.
    pub fn tax_amount(&self) -> Option<Decimal> {
        tax_amount(&self.lines)
    }

    /// Report filename, when the record carries an issue timestamp that
    /// stays in range after the configured shift.
    pub fn report_filename(&self, config: &ReportConfig) -> Option<String> {
        self.invoice_datetime
            .and_then(|at| report_base_filename(&self.company_vat, at, &self.id, config))
    }

    /// Resolve every printed term. Never fails: problems show up as text.
    pub fn report(&self, extractor: &InvoiceFieldExtractor, config: &ReportConfig) -> InvoiceReport {
        let encoded = self.encoded();

        let lines = self
            .line_ids
            .iter()
            .map(|id| {
                let term = |t: LineTerm| extractor.line_term_text(encoded, id, t);
                LineReport {
                    id: id.clone(),
                    line_extension_amount: term(LineTerm::LineExtensionAmount),
                    allowance_amount: term(LineTerm::AllowanceAmount),
                    tax_amount: term(LineTerm::TaxAmount),
                    rounding_amount: term(LineTerm::RoundingAmount),
                }
            })
            .collect();

        InvoiceReport {
            id: self.id.clone(),
            invoice_type_code: extractor.invoice_type_code_text(encoded),
            exemption_reason: extractor.exemption_reason_text(encoded),
            currency: self.currency_or(config).to_string(),
            tax_amount: self.tax_amount(),
            filename: self.report_filename(config),
            lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ubl::{encode_payload, CAC_NS, CBC_NS};
    use pretty_assertions::assert_eq;

    fn record() -> InvoiceRecord {
        let xml = format!(
            r#"<Invoice xmlns:cbc="{CBC_NS}" xmlns:cac="{CAC_NS}">
  <cbc:InvoiceTypeCode name="0100000">388</cbc:InvoiceTypeCode>
  <cac:InvoiceLine>
    <cbc:ID>1</cbc:ID>
    <cbc:LineExtensionAmount>200.00</cbc:LineExtensionAmount>
    <cac:TaxTotal>
      <cbc:TaxAmount>30.00</cbc:TaxAmount>
      <cbc:RoundingAmount>230.00</cbc:RoundingAmount>
    </cac:TaxTotal>
  </cac:InvoiceLine>
</Invoice>"#
        );

        serde_json::from_value(serde_json::json!({
            "id": "17",
            "company_vat": "310122393500003",
            "invoice_datetime": "2024-05-01T09:00:00",
            "encoded_invoice": encode_payload(&xml),
            "line_ids": ["1"],
            "lines": [
                {"price_unit": "100", "quantity": "2", "tax_rates": ["15"]},
                {"price_unit": "50", "quantity": "1"}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_report() {
        let config = ReportConfig::default();
        let report = record().report(&InvoiceFieldExtractor::new(), &config);

        assert_eq!(report.invoice_type_code, "0100000");
        assert_eq!(report.currency, "SAR");
        assert_eq!(report.tax_amount, Some(Decimal::from(30)));
        assert_eq!(
            report.filename.as_deref(),
            Some("310122393500003 - 2024-05-01 12_00_00 - 17")
        );
        assert_eq!(
            report.lines,
            vec![LineReport {
                id: "1".into(),
                line_extension_amount: "200.00".into(),
                allowance_amount: "0.0".into(),
                tax_amount: "30.00".into(),
                rounding_amount: "230.00".into(),
            }]
        );
    }

    #[test]
    fn test_report_without_payload() {
        let mut record = record();
        record.encoded_invoice = None;
        record.currency = Some("USD".into());

        let report = record.report(&InvoiceFieldExtractor::new(), &ReportConfig::default());
        assert_eq!(report.invoice_type_code, "Invoice data not available");
        assert_eq!(report.lines[0].rounding_amount, "Invoice data not available");
        assert_eq!(report.currency, "USD");
    }

    #[test]
    fn test_report_survives_out_of_range_values() {
        let mut record = record();
        record.lines.push(InvoiceLine {
            price_unit: Decimal::MAX,
            quantity: Decimal::from(2),
            tax_rates: vec![Decimal::from(15)],
        });
        let config = ReportConfig {
            utc_offset_hours: 9_000_000_000_000_000,
            ..ReportConfig::default()
        };

        let report = record.report(&InvoiceFieldExtractor::new(), &config);
        assert_eq!(report.tax_amount, None);
        assert_eq!(report.filename, None);
        assert_eq!(report.lines[0].line_extension_amount, "200.00");
    }
}
