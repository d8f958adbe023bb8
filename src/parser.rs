//! SOAP XML parsing.
//!
//! A quick-xml pass identifies the envelope version and refuses DTDs before the
//! document is materialized as an element tree.

use crate::config::SoapVersion;
use crate::error::SoapError;
use crate::message::SoapMessage;
use quick_xml::events::Event;
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;
use xmltree::Element;

/// SOAP namespace URIs.
pub const SOAP_11_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub const SOAP_12_NS: &str = "http://www.w3.org/2003/05/soap-envelope";

/// Parse raw bytes as a SOAP message.
pub fn parse_soap_message(data: &[u8]) -> Result<SoapMessage, SoapError> {
    let xml_str = std::str::from_utf8(data)
        .map_err(|e| SoapError::XmlParse(format!("Invalid UTF-8: {}", e)))?;

    check_xxe_patterns(xml_str)?;

    let version = detect_version(xml_str)?;
    let envelope = Element::parse(xml_str.as_bytes())?;

    let message = SoapMessage::from_envelope(version, envelope);
    if message.body().is_none() {
        return Err(SoapError::InvalidEnvelope(
            "SOAP Envelope has no Body".to_string(),
        ));
    }
    Ok(message)
}

/// Find the root element and map its namespace to a SOAP version.
fn detect_version(xml: &str) -> Result<SoapVersion, SoapError> {
    let mut reader = NsReader::from_str(xml);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_resolved_event() {
            Ok((ns, Event::Start(e))) | Ok((ns, Event::Empty(e))) => {
                let local = e.local_name();
                if local.as_ref() != b"Envelope" {
                    return Err(SoapError::InvalidEnvelope(format!(
                        "Root element is '{}', expected Envelope",
                        String::from_utf8_lossy(local.as_ref())
                    )));
                }
                return match ns {
                    ResolveResult::Bound(uri) => {
                        let uri = std::str::from_utf8(uri.0).unwrap_or("");
                        SoapVersion::from_namespace(uri).ok_or_else(|| {
                            SoapError::InvalidEnvelope(format!(
                                "Unrecognized envelope namespace '{}'",
                                uri
                            ))
                        })
                    }
                    _ => Err(SoapError::InvalidEnvelope(
                        "Envelope has no namespace".to_string(),
                    )),
                };
            }
            Ok((_, Event::DocType(_))) => {
                return Err(SoapError::XmlParse(
                    "DOCTYPE declarations are not allowed".to_string(),
                ));
            }
            Ok((_, Event::Eof)) => {
                return Err(SoapError::InvalidEnvelope(
                    "No SOAP Envelope found".to_string(),
                ));
            }
            Ok(_) => {}
            Err(e) => return Err(SoapError::XmlParse(format!("XML parse error: {}", e))),
        }
    }
}

/// Check for XXE attack patterns.
fn check_xxe_patterns(xml: &str) -> Result<(), SoapError> {
    if xml.contains("<!DOCTYPE") || xml.contains("<!doctype") {
        return Err(SoapError::XmlParse(
            "DOCTYPE declarations are not allowed".to_string(),
        ));
    }

    if xml.contains("<!ENTITY") || xml.contains("<!entity") {
        return Err(SoapError::XmlParse(
            "Entity declarations are not allowed".to_string(),
        ));
    }

    Ok(())
}
