//! UBL 2.1 namespaces, qualified names and tree lookups.

mod document;

pub use document::{
    decode_payload, descend, encode_payload, find_first, find_id_parent, parse_document,
};

use std::fmt;

use roxmltree::Node;

/// `cbc` namespace: leaf values such as amounts, codes and identifiers.
pub const CBC_NS: &str = "urn:oasis:names:specification:ubl:schema:xsd:CommonBasicComponents-2";

/// `cac` namespace: aggregates such as `TaxTotal` or `AllowanceCharge`.
pub const CAC_NS: &str = "urn:oasis:names:specification:ubl:schema:xsd:CommonAggregateComponents-2";

/// A namespace-qualified element name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QName {
    pub namespace: &'static str,
    pub local: &'static str,
}

impl QName {
    /// Element in the `cbc` namespace.
    pub const fn cbc(local: &'static str) -> Self {
        Self { namespace: CBC_NS, local }
    }

    /// Element in the `cac` namespace.
    pub const fn cac(local: &'static str) -> Self {
        Self { namespace: CAC_NS, local }
    }

    /// Check whether `node` is an element with this name.
    pub fn matches(&self, node: &Node) -> bool {
        node.is_element() && node.has_tag_name((self.namespace, self.local))
    }

    fn prefix(&self) -> &'static str {
        match self.namespace {
            CBC_NS => "cbc",
            CAC_NS => "cac",
            _ => "ns",
        }
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.prefix(), self.local)
    }
}

pub const ID: QName = QName::cbc("ID");
pub const INVOICE_TYPE_CODE: QName = QName::cbc("InvoiceTypeCode");
pub const LINE_EXTENSION_AMOUNT: QName = QName::cbc("LineExtensionAmount");
pub const AMOUNT: QName = QName::cbc("Amount");
pub const TAX_AMOUNT: QName = QName::cbc("TaxAmount");
pub const ROUNDING_AMOUNT: QName = QName::cbc("RoundingAmount");
pub const TAX_EXEMPTION_REASON: QName = QName::cbc("TaxExemptionReason");
pub const ALLOWANCE_CHARGE: QName = QName::cac("AllowanceCharge");
pub const TAX_TOTAL: QName = QName::cac("TaxTotal");
pub const TAX_SUBTOTAL: QName = QName::cac("TaxSubtotal");
pub const TAX_CATEGORY: QName = QName::cac("TaxCategory");

/// Ordered child steps walked from an anchor element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath {
    steps: &'static [QName],
}

impl FieldPath {
    /// Build a path.
    ///
    /// # Panics
    ///
    /// Panics if `steps` is empty. In a `const` item this is a compile error;
    /// use [`try_new`](Self::try_new) for paths assembled at runtime.
    pub const fn new(steps: &'static [QName]) -> Self {
        assert!(!steps.is_empty(), "field path needs at least one step");
        Self { steps }
    }

    /// Build a path, `None` when `steps` is empty.
    pub const fn try_new(steps: &'static [QName]) -> Option<Self> {
        if steps.is_empty() {
            None
        } else {
            Some(Self { steps })
        }
    }

    pub fn steps(&self) -> &'static [QName] {
        self.steps
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_qname_matches_namespace_not_prefix() {
        let xml = format!(
            r#"<r xmlns:b="{CBC_NS}" xmlns:a="{CAC_NS}"><b:ID>1</b:ID><a:ID>2</a:ID></r>"#
        );
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let hits: Vec<_> = doc
            .descendants()
            .filter(|n| ID.matches(n))
            .filter_map(|n| n.text())
            .collect();

        assert_eq!(hits, vec!["1"]);
    }

    #[test]
    fn test_field_path_display() {
        const PATH: FieldPath = FieldPath::new(&[ALLOWANCE_CHARGE, AMOUNT]);
        assert_eq!(PATH.to_string(), "cac:AllowanceCharge/cbc:Amount");
        assert_eq!(PATH.steps().len(), 2);
    }

    #[test]
    fn test_try_new_rejects_empty_path() {
        assert_eq!(FieldPath::try_new(&[]), None);
        assert_eq!(
            FieldPath::try_new(&[TAX_TOTAL, TAX_AMOUNT]).map(|p| p.to_string()),
            Some("cac:TaxTotal/cbc:TaxAmount".to_string())
        );
    }

    #[test]
    #[should_panic(expected = "field path needs at least one step")]
    fn test_new_panics_on_empty_path() {
        let steps: &'static [QName] = &[];
        FieldPath::new(steps);
    }
}
