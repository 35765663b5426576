//! SOAP 1.1 envelope for the ePOS-Print service

/// Namespace of the `epos-print` element
pub const EPOS_PRINT_NS: &str = "http://www.epson-pos.com/schemas/2011/03/epos-print";

/// Opening part of the request document, up to and including `<epos-print>`
pub const ENVELOPE_OPEN: &str = concat!(
    r#"<?xml version="1.0" encoding="utf-8"?>"#,
    r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">"#,
    r#"<s:Body><epos-print xmlns="http://www.epson-pos.com/schemas/2011/03/epos-print">"#,
);

/// Closing part of the request document
pub const ENVELOPE_CLOSE: &str = "</epos-print></s:Body></s:Envelope>";

/// Wrap command fragments into a request document, one fragment per line
pub fn envelope<S: AsRef<str>>(fragments: &[S]) -> String {
    let body_len: usize = fragments.iter().map(|f| f.as_ref().len() + 1).sum();
    let mut doc = String::with_capacity(ENVELOPE_OPEN.len() + body_len + ENVELOPE_CLOSE.len() + 1);

    doc.push_str(ENVELOPE_OPEN);
    for fragment in fragments {
        doc.push('\n');
        doc.push_str(fragment.as_ref());
    }
    doc.push('\n');
    doc.push_str(ENVELOPE_CLOSE);
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_envelope() {
        let fragments: [&str; 0] = [];
        assert_eq!(
            envelope(&fragments),
            format!("{}\n{}", ENVELOPE_OPEN, ENVELOPE_CLOSE)
        );
    }

    #[test]
    fn test_fragments_in_order() {
        let doc = envelope(&["<a/>", "<b/>"]);
        let lines: Vec<&str> = doc.lines().collect();
        assert_eq!(lines, [ENVELOPE_OPEN, "<a/>", "<b/>", ENVELOPE_CLOSE]);
    }

    #[test]
    fn test_namespace_in_open() {
        assert!(ENVELOPE_OPEN.contains(EPOS_PRINT_NS));
        assert!(ENVELOPE_OPEN.ends_with(&format!(r#"<epos-print xmlns="{}">"#, EPOS_PRINT_NS)));
    }
}
