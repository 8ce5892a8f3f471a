//! Payload decoding and element lookups over a parsed invoice.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use roxmltree::{Document, Node, ParsingOptions};
use tracing::debug;

use crate::error::ExtractionError;

use super::{FieldPath, QName, ID};

/// Decode a base64 invoice payload into XML text.
///
/// ASCII whitespace is ignored so that line-wrapped payloads decode the same
/// as single-line ones. An absent or blank payload is reported as
/// [`ExtractionError::MissingPayload`].
pub fn decode_payload(encoded: Option<&str>) -> Result<String, ExtractionError> {
    let encoded = match encoded {
        Some(s) if !s.trim().is_empty() => s,
        _ => return Err(ExtractionError::MissingPayload),
    };

    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD.decode(compact.as_bytes())?;
    let text = String::from_utf8(bytes)?;

    debug!("Decoded invoice payload: {} bytes of XML", text.len());
    Ok(text)
}

/// Encode XML text as an invoice payload.
pub fn encode_payload(xml: &str) -> String {
    STANDARD.encode(xml.as_bytes())
}

/// Parse decoded invoice XML.
///
/// A `<!DOCTYPE>` is accepted; entity declarations in it are expanded the
/// way roxmltree does.
pub fn parse_document(xml: &str) -> Result<Document<'_>, ExtractionError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Ok(Document::parse_with_options(xml, options)?)
}

/// First element named `name` anywhere in the document.
pub fn find_first<'a, 'input>(doc: &'a Document<'input>, name: QName) -> Option<Node<'a, 'input>> {
    doc.descendants().find(|n| name.matches(n))
}

/// Parent element of the first `cbc:ID` whose text equals `id`.
///
/// An `<cbc:ID/>` with no text matches the empty id.
pub fn find_id_parent<'a, 'input>(
    doc: &'a Document<'input>,
    id: &str,
) -> Result<Node<'a, 'input>, ExtractionError> {
    let anchor = doc
        .descendants()
        .find(|n| ID.matches(n) && n.text().unwrap_or("") == id)
        .ok_or_else(|| ExtractionError::IdNotFound { id: id.to_string() })?;

    anchor
        .parent_element()
        .ok_or_else(|| ExtractionError::DetachedId { id: id.to_string() })
}

/// Walk `path` one direct child at a time. `None` as soon as a step is missing.
pub fn descend<'a, 'input>(start: Node<'a, 'input>, path: &FieldPath) -> Option<Node<'a, 'input>> {
    path.steps()
        .iter()
        .try_fold(start, |node, step| node.children().find(|c| step.matches(c)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::ubl::{ALLOWANCE_CHARGE, AMOUNT, CAC_NS, CBC_NS, LINE_EXTENSION_AMOUNT};
    use pretty_assertions::assert_eq;

    fn line_xml() -> String {
        format!(
            r#"<Invoice xmlns:cbc="{CBC_NS}" xmlns:cac="{CAC_NS}">
  <cac:InvoiceLine>
    <cbc:ID>1</cbc:ID>
    <cbc:LineExtensionAmount currencyID="SAR">200.00</cbc:LineExtensionAmount>
    <cac:AllowanceCharge><cbc:Amount>5.00</cbc:Amount></cac:AllowanceCharge>
  </cac:InvoiceLine>
  <cac:InvoiceLine>
    <cbc:ID>2</cbc:ID>
  </cac:InvoiceLine>
</Invoice>"#
        )
    }

    #[test]
    fn test_decode_roundtrip_with_wrapped_lines() {
        let xml = line_xml();
        let encoded = encode_payload(&xml);
        let wrapped: String = encoded
            .as_bytes()
            .chunks(76)
            .map(|c| std::str::from_utf8(c).unwrap())
            .collect::<Vec<_>>()
            .join("\n");

        assert_eq!(decode_payload(Some(&wrapped)).unwrap(), xml);
    }

    #[test]
    fn test_decode_missing_and_invalid() {
        assert_eq!(decode_payload(None).unwrap_err().kind(), ErrorKind::MissingPayload);
        assert_eq!(decode_payload(Some("  ")).unwrap_err().kind(), ErrorKind::MissingPayload);
        assert_eq!(decode_payload(Some("@@@")).unwrap_err().kind(), ErrorKind::DecodeFailure);

        // 0xff 0xfe is valid base64 content but not UTF-8.
        assert_eq!(decode_payload(Some("//4=")).unwrap_err().kind(), ErrorKind::DecodeFailure);
    }

    #[test]
    fn test_find_id_parent_and_descend() {
        let xml = line_xml();
        let doc = Document::parse(&xml).unwrap();

        let line = find_id_parent(&doc, "1").unwrap();
        assert_eq!(line.tag_name().name(), "InvoiceLine");

        const DIRECT: FieldPath = FieldPath::new(&[LINE_EXTENSION_AMOUNT]);
        const NESTED: FieldPath = FieldPath::new(&[ALLOWANCE_CHARGE, AMOUNT]);
        assert_eq!(descend(line, &DIRECT).and_then(|n| n.text()), Some("200.00"));
        assert_eq!(descend(line, &NESTED).and_then(|n| n.text()), Some("5.00"));

        let bare = find_id_parent(&doc, "2").unwrap();
        assert!(descend(bare, &NESTED).is_none());
    }

    #[test]
    fn test_parse_accepts_doctype() {
        let xml = format!(
            "<?xml version=\"1.0\"?>\n<!DOCTYPE Invoice>\n{}",
            line_xml()
        );
        let doc = parse_document(&xml).unwrap();

        let line = find_id_parent(&doc, "1").unwrap();
        const DIRECT: FieldPath = FieldPath::new(&[LINE_EXTENSION_AMOUNT]);
        assert_eq!(descend(line, &DIRECT).and_then(|n| n.text()), Some("200.00"));

        assert_eq!(
            parse_document("<Invoice>").unwrap_err().kind(),
            ErrorKind::ParseFailure
        );
    }

    #[test]
    fn test_find_id_parent_misses() {
        let xml = line_xml();
        let doc = Document::parse(&xml).unwrap();
        assert!(matches!(
            find_id_parent(&doc, "9"),
            Err(ExtractionError::IdNotFound { .. })
        ));

        let root_id = format!(r#"<cbc:ID xmlns:cbc="{CBC_NS}">1</cbc:ID>"#);
        let doc = Document::parse(&root_id).unwrap();
        assert!(matches!(
            find_id_parent(&doc, "1"),
            Err(ExtractionError::DetachedId { .. })
        ));
    }
}
