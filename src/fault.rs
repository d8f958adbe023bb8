//! SOAP Fault construction and inspection.

use crate::config::SoapVersion;
use crate::message::{child_elements, SoapMessage};
use xmltree::{Element, XMLNode};

/// The code and reason of a SOAP Fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapFault {
    /// Fault code, e.g. `soap:Client` (1.1) or `soap:Sender` (1.2)
    pub code: String,
    /// Human-readable reason
    pub reason: String,
}

impl SoapFault {
    pub fn new(code: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            reason: reason.into(),
        }
    }

    /// Client-side fault for the given version.
    pub fn client(version: SoapVersion, reason: impl Into<String>) -> Self {
        let code = match version {
            SoapVersion::Soap11 => "soap:Client",
            SoapVersion::Soap12 => "soap:Sender",
        };
        Self::new(code, reason)
    }

    /// Extract the fault carried in a message body, if any.
    pub fn from_message(message: &SoapMessage) -> Option<Self> {
        let fault = message.body().and_then(|body| child_named(body, "Fault"))?;

        match message.version() {
            SoapVersion::Soap11 => Some(Self::new(
                text_of(child_named(fault, "faultcode")),
                text_of(child_named(fault, "faultstring")),
            )),
            SoapVersion::Soap12 => Some(Self::new(
                text_of(child_named(fault, "Code").and_then(|c| child_named(c, "Value"))),
                text_of(child_named(fault, "Reason").and_then(|r| child_named(r, "Text"))),
            )),
        }
    }
}

/// Build a message whose body carries `fault`.
pub fn build_fault(version: SoapVersion, fault: &SoapFault) -> SoapMessage {
    let mut message = SoapMessage::new(version);
    let ns = version.namespace();
    let prefix = message.envelope().prefix.clone();

    let mut fault_elem = qualified("Fault", prefix.as_deref(), ns);
    match version {
        SoapVersion::Soap11 => {
            fault_elem
                .children
                .push(XMLNode::Element(text_element(Element::new("faultcode"), &fault.code)));
            fault_elem
                .children
                .push(XMLNode::Element(text_element(Element::new("faultstring"), &fault.reason)));
        }
        SoapVersion::Soap12 => {
            let mut code = qualified("Code", prefix.as_deref(), ns);
            code.children.push(XMLNode::Element(text_element(
                qualified("Value", prefix.as_deref(), ns),
                &fault.code,
            )));

            let mut reason = qualified("Reason", prefix.as_deref(), ns);
            reason.children.push(XMLNode::Element(text_element(
                qualified("Text", prefix.as_deref(), ns),
                &fault.reason,
            )));

            fault_elem.children.push(XMLNode::Element(code));
            fault_elem.children.push(XMLNode::Element(reason));
        }
    }

    if let Some(body) = message.body_mut() {
        body.children.push(XMLNode::Element(fault_elem));
    }
    message
}

fn qualified(name: &str, prefix: Option<&str>, ns: &str) -> Element {
    let mut element = Element::new(name);
    element.prefix = prefix.map(String::from);
    element.namespace = Some(ns.to_string());
    element
}

fn text_element(mut element: Element, text: &str) -> Element {
    element.children.push(XMLNode::Text(text.to_string()));
    element
}

fn child_named<'a>(parent: &'a Element, local_name: &str) -> Option<&'a Element> {
    child_elements(parent).find(|e| e.name == local_name)
}

fn text_of(element: Option<&Element>) -> String {
    element
        .and_then(|e| e.get_text())
        .map(|t| t.trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_soap_message;

    #[test]
    fn test_soap_11_fault_round_trip() {
        let fault = SoapFault::client(SoapVersion::Soap11, "Missing token");
        let message = build_fault(SoapVersion::Soap11, &fault);

        assert_eq!(SoapFault::from_message(&message), Some(fault));
        let xml = message.to_xml_string().unwrap();
        assert!(xml.contains("http://schemas.xmlsoap.org/soap/envelope/"));
        assert!(xml.contains("<faultstring>Missing token</faultstring>"));
    }

    #[test]
    fn test_soap_12_fault_from_wire() {
        let xml = r#"<env:Envelope xmlns:env="http://www.w3.org/2003/05/soap-envelope">
  <env:Body>
    <env:Fault>
      <env:Code><env:Value>env:Receiver</env:Value></env:Code>
      <env:Reason><env:Text xml:lang="en">Backend unavailable</env:Text></env:Reason>
    </env:Fault>
  </env:Body>
</env:Envelope>"#;
        let message = parse_soap_message(xml.as_bytes()).unwrap();
        let fault = SoapFault::from_message(&message).unwrap();
        assert_eq!(fault.code, "env:Receiver");
        assert_eq!(fault.reason, "Backend unavailable");
    }

    #[test]
    fn test_soap_12_client_code() {
        let fault = SoapFault::client(SoapVersion::Soap12, "bad");
        assert_eq!(fault.code, "soap:Sender");
        let message = build_fault(SoapVersion::Soap12, &fault);
        assert_eq!(SoapFault::from_message(&message), Some(fault));
    }

    #[test]
    fn test_no_fault_in_plain_message() {
        let message = SoapMessage::new(SoapVersion::Soap11);
        assert!(SoapFault::from_message(&message).is_none());
    }
}
