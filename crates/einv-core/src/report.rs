//! Report naming.

use chrono::{NaiveDateTime, TimeDelta};

use crate::models::config::ReportConfig;

/// Base filename for a printed invoice: `{vat} - {YYYY-MM-DD HH_MM_SS} - {id}`.
///
/// `invoice_datetime` is stored in UTC and shifted by the configured offset
/// before formatting. `None` when the shifted time is out of chrono's range.
pub fn report_base_filename(
    vat: &str,
    invoice_datetime: NaiveDateTime,
    id: &str,
    config: &ReportConfig,
) -> Option<String> {
    let offset = TimeDelta::try_hours(config.utc_offset_hours)?;
    let local = invoice_datetime.checked_add_signed(offset)?;
    let sep = &config.filename_separator;
    Some(format!("{vat}{sep}{}{sep}{id}", local.format("%Y-%m-%d %H_%M_%S")))
}
