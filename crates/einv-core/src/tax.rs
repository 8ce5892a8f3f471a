//! Invoice VAT total computed from line records.

use rust_decimal::Decimal;

use crate::models::record::InvoiceLine;

/// VAT for a single line: `first_rate * price_unit * quantity / 100`.
///
/// Only the first tax rate applies; a line without taxes contributes zero.
/// `None` when the product does not fit in a `Decimal`.
pub fn line_tax(line: &InvoiceLine) -> Option<Decimal> {
    let rate = line.tax_rates.first().copied().unwrap_or(Decimal::ZERO);
    rate.checked_mul(line.price_unit)?
        .checked_mul(line.quantity)?
        .checked_div(Decimal::ONE_HUNDRED)
}

/// Sum of [`line_tax`] over all lines, `None` on overflow.
pub fn tax_amount(lines: &[InvoiceLine]) -> Option<Decimal> {
    lines
        .iter()
        .try_fold(Decimal::ZERO, |total, line| total.checked_add(line_tax(line)?))
}
