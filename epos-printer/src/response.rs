//! ePOS-Print response parsing
//!
//! The device answers with a SOAP document whose body holds a single
//! `<response success="true|false" code="..." status="..."/>` element.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{PrintError, PrintResult};

/// Parsed `<response>` element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrintResponse {
    /// `success` attribute; `None` when the device omitted it
    pub success: Option<bool>,
    /// Error code reported by the device (e.g., `EPTR_COVER_OPEN`)
    pub code: Option<String>,
    /// Printer status bit field, as sent
    pub status: Option<String>,
}

impl PrintResponse {
    /// Only an explicit `success="true"` counts as success
    pub fn is_success(&self) -> bool {
        self.success == Some(true)
    }

    /// Parse a device reply
    ///
    /// Fails when the document is not well-formed XML or holds no
    /// `response` element.
    pub fn parse(xml: &str) -> PrintResult<Self> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut found = None;
        let mut open: Vec<Vec<u8>> = Vec::new();

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    if found.is_none() && e.local_name().as_ref() == b"response" {
                        found = Some(Self::from_element(&e)?);
                    }
                    open.push(e.name().as_ref().to_vec());
                }
                Event::Empty(e) => {
                    if found.is_none() && e.local_name().as_ref() == b"response" {
                        found = Some(Self::from_element(&e)?);
                    }
                }
                Event::End(e) => {
                    if open.pop().as_deref() != Some(e.name().as_ref()) {
                        return Err(PrintError::MalformedResponse(format!(
                            "unexpected closing tag '{}'",
                            String::from_utf8_lossy(e.name().as_ref())
                        )));
                    }
                }
                Event::Text(_) if open.is_empty() => {
                    return Err(PrintError::MalformedResponse(
                        "text outside root element".to_string(),
                    ));
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !open.is_empty() {
            return Err(PrintError::MalformedResponse(
                "unclosed element at end of document".to_string(),
            ));
        }

        found.ok_or_else(|| PrintError::MalformedResponse("missing response element".to_string()))
    }

    fn from_element(element: &BytesStart<'_>) -> PrintResult<Self> {
        let mut response = PrintResponse::default();

        for attr in element.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let value = attr.unescape_value()?;
            match attr.key.local_name().as_ref() {
                b"success" => response.success = Some(value == "true"),
                b"code" if !value.is_empty() => response.code = Some(value.into_owned()),
                b"status" => response.status = Some(value.into_owned()),
                _ => {}
            }
        }

        Ok(response)
    }
}
