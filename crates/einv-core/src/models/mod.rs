//! Data models: host records and configuration.

pub mod config;
pub mod record;

pub use config::{EinvConfig, ExtractionConfig, ReportConfig};
pub use record::{InvoiceLine, InvoiceRecord, InvoiceReport, LineReport};
