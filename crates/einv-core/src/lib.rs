//! Core library for reading business terms out of UBL e-invoices.
//!
//! This crate provides:
//! - base64 payload decoding and namespaced UBL lookups
//! - line terms (BT-131, BT-136, KSA-11, KSA-12) keyed on the line `cbc:ID`
//! - invoice terms (invoice type code, BT-120 exemption reason)
//! - VAT totals computed from host line records
//! - report filenames and a printable per-invoice report

pub mod error;
pub mod extractor;
pub mod models;
pub mod report;
pub mod tax;
pub mod terms;
pub mod ubl;

pub use error::{EinvError, ErrorKind, ExtractionError, Result};
pub use extractor::{FieldValue, InvoiceFieldExtractor};
pub use models::config::EinvConfig;
pub use models::record::{InvoiceLine, InvoiceRecord, InvoiceReport, LineReport};
pub use report::report_base_filename;
pub use tax::tax_amount;
pub use terms::LineTerm;
pub use ubl::{FieldPath, QName, CAC_NS, CBC_NS};
