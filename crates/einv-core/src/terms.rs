//! Line-level business terms and the element paths that carry them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ubl::{
    FieldPath, ALLOWANCE_CHARGE, AMOUNT, LINE_EXTENSION_AMOUNT, ROUNDING_AMOUNT, TAX_AMOUNT,
    TAX_TOTAL,
};

/// A business term read relative to an invoice line's `cbc:ID`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineTerm {
    /// BT-131: invoice line net amount.
    #[serde(rename = "BT-131")]
    LineExtensionAmount,

    /// BT-136: invoice line allowance amount.
    #[serde(rename = "BT-136")]
    AllowanceAmount,

    /// KSA-11: line VAT amount.
    #[serde(rename = "KSA-11")]
    TaxAmount,

    /// KSA-12: line amount inclusive of VAT.
    #[serde(rename = "KSA-12")]
    RoundingAmount,
}

impl LineTerm {
    pub const ALL: [LineTerm; 4] = [
        LineTerm::LineExtensionAmount,
        LineTerm::AllowanceAmount,
        LineTerm::TaxAmount,
        LineTerm::RoundingAmount,
    ];

    /// Business term code, e.g. `BT-131`.
    pub fn code(&self) -> &'static str {
        match self {
            LineTerm::LineExtensionAmount => "BT-131",
            LineTerm::AllowanceAmount => "BT-136",
            LineTerm::TaxAmount => "KSA-11",
            LineTerm::RoundingAmount => "KSA-12",
        }
    }

    /// Path from the line element to the value.
    pub fn path(&self) -> FieldPath {
        const BT_131: FieldPath = FieldPath::new(&[LINE_EXTENSION_AMOUNT]);
        const BT_136: FieldPath = FieldPath::new(&[ALLOWANCE_CHARGE, AMOUNT]);
        const KSA_11: FieldPath = FieldPath::new(&[TAX_TOTAL, TAX_AMOUNT]);
        const KSA_12: FieldPath = FieldPath::new(&[TAX_TOTAL, ROUNDING_AMOUNT]);

        match self {
            LineTerm::LineExtensionAmount => BT_131,
            LineTerm::AllowanceAmount => BT_136,
            LineTerm::TaxAmount => KSA_11,
            LineTerm::RoundingAmount => KSA_12,
        }
    }
}

impl fmt::Display for LineTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Returned when a string names no known line term.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown business term: {0}")]
pub struct UnknownTerm(pub String);

impl FromStr for LineTerm {
    type Err = UnknownTerm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('_', "-");
        LineTerm::ALL
            .into_iter()
            .find(|t| t.code() == normalized)
            .ok_or_else(|| UnknownTerm(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_codes() {
        assert_eq!("BT-131".parse::<LineTerm>(), Ok(LineTerm::LineExtensionAmount));
        assert_eq!("bt_136".parse::<LineTerm>(), Ok(LineTerm::AllowanceAmount));
        assert_eq!(" ksa-12 ".parse::<LineTerm>(), Ok(LineTerm::RoundingAmount));
        assert!("BT-999".parse::<LineTerm>().is_err());
    }

    #[test]
    fn test_paths() {
        assert_eq!(LineTerm::LineExtensionAmount.path().to_string(), "cbc:LineExtensionAmount");
        assert_eq!(LineTerm::TaxAmount.path().to_string(), "cac:TaxTotal/cbc:TaxAmount");
        assert_eq!(
            LineTerm::RoundingAmount.path().to_string(),
            "cac:TaxTotal/cbc:RoundingAmount"
        );
    }

    #[test]
    fn test_serde_uses_codes() {
        let json = serde_json::to_string(&LineTerm::TaxAmount).unwrap();
        assert_eq!(json, "\"KSA-11\"");
    }
}
