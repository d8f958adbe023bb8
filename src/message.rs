//! The SOAP message payload: an envelope tree with an optional header section.

use crate::config::SoapVersion;
use crate::error::SoapError;
use xmltree::{Element, EmitterConfig, Namespace, XMLNode};

/// Prefix used for envelopes built from scratch.
pub const DEFAULT_ENVELOPE_PREFIX: &str = "soap";

/// A SOAP message held as a mutable element tree.
///
/// Mutations made through [`SoapMessage::get_or_create_header`] or
/// [`SoapMessage::body_mut`] only reach the wire form once
/// [`SoapMessage::save_changes`] commits them.
#[derive(Debug, Clone)]
pub struct SoapMessage {
    version: SoapVersion,
    envelope: Element,
    pretty_print: bool,
    /// Wire form as of the last commit
    committed: Option<String>,
    save_count: usize,
}

impl SoapMessage {
    /// Create an empty message: an envelope holding an empty body and no header.
    pub fn new(version: SoapVersion) -> Self {
        let mut envelope = soap_element(
            "Envelope",
            Some(DEFAULT_ENVELOPE_PREFIX),
            version.namespace(),
        );
        let mut namespaces = Namespace::empty();
        namespaces.put(DEFAULT_ENVELOPE_PREFIX, version.namespace());
        envelope.namespaces = Some(namespaces);

        let body = soap_element("Body", Some(DEFAULT_ENVELOPE_PREFIX), version.namespace());
        envelope.children.push(XMLNode::Element(body));

        Self::from_envelope(version, envelope)
    }

    /// Wrap an already-built envelope element.
    pub(crate) fn from_envelope(version: SoapVersion, envelope: Element) -> Self {
        Self {
            version,
            envelope,
            pretty_print: false,
            committed: None,
            save_count: 0,
        }
    }

    pub fn version(&self) -> SoapVersion {
        self.version
    }

    /// Indent the committed wire form.
    pub fn set_pretty_print(&mut self, pretty_print: bool) {
        self.pretty_print = pretty_print;
    }

    pub fn envelope(&self) -> &Element {
        &self.envelope
    }

    /// The header section, if the envelope has one.
    pub fn header(&self) -> Option<&Element> {
        self.header_index()
            .and_then(|idx| element_at(&self.envelope.children, idx))
    }

    pub fn header_mut(&mut self) -> Option<&mut Element> {
        let idx = self.header_index()?;
        element_at_mut(&mut self.envelope.children, idx)
    }

    /// Attach a new, empty header section.
    ///
    /// Fails when the envelope already carries one: an envelope never holds two.
    pub fn add_header(&mut self) -> Result<&mut Element, SoapError> {
        if self.header_index().is_some() {
            return Err(SoapError::protocol("SOAP envelope already has a Header"));
        }
        let idx = self.insert_header();
        element_at_mut(&mut self.envelope.children, idx)
            .ok_or_else(|| SoapError::protocol("Header was not attached to the envelope"))
    }

    /// Return the header section, attaching an empty one first when absent.
    pub fn get_or_create_header(&mut self) -> Result<&mut Element, SoapError> {
        let idx = match self.header_index() {
            Some(idx) => idx,
            None => self.insert_header(),
        };
        element_at_mut(&mut self.envelope.children, idx)
            .ok_or_else(|| SoapError::protocol("Header was not attached to the envelope"))
    }

    pub fn body(&self) -> Option<&Element> {
        self.child_index("Body")
            .and_then(|idx| element_at(&self.envelope.children, idx))
    }

    pub fn body_mut(&mut self) -> Option<&mut Element> {
        let idx = self.child_index("Body")?;
        element_at_mut(&mut self.envelope.children, idx)
    }

    /// Commit pending tree mutations into the wire form.
    pub fn save_changes(&mut self) -> Result<(), SoapError> {
        let xml = self.to_xml_string()?;
        self.committed = Some(xml);
        self.save_count += 1;
        Ok(())
    }

    /// Number of times [`SoapMessage::save_changes`] succeeded.
    pub fn save_count(&self) -> usize {
        self.save_count
    }

    /// Wire form as of the last commit.
    pub fn committed_xml(&self) -> Option<&str> {
        self.committed.as_deref()
    }

    /// Serialize the current tree, committed or not.
    pub fn to_xml_string(&self) -> Result<String, SoapError> {
        let mut buf = Vec::new();
        let mut config = EmitterConfig::new().write_document_declaration(true);
        if self.pretty_print {
            config = config.perform_indent(true).indent_string("  ");
        }
        self.envelope.write_with_config(&mut buf, config)?;

        String::from_utf8(buf).map_err(|e| SoapError::Serialize(format!("Invalid UTF-8: {}", e)))
    }

    fn header_index(&self) -> Option<usize> {
        self.child_index("Header")
    }

    fn child_index(&self, local_name: &str) -> Option<usize> {
        let ns = self.version.namespace();
        self.envelope.children.iter().position(|node| match node {
            XMLNode::Element(e) => e.name == local_name && e.namespace.as_deref() == Some(ns),
            _ => false,
        })
    }

    /// Insert an empty header ahead of the first element child (the body).
    fn insert_header(&mut self) -> usize {
        let header = soap_element(
            "Header",
            self.envelope.prefix.as_deref(),
            self.version.namespace(),
        );
        let idx = self
            .envelope
            .children
            .iter()
            .position(|node| matches!(node, XMLNode::Element(_)))
            .unwrap_or(self.envelope.children.len());
        self.envelope.children.insert(idx, XMLNode::Element(header));
        idx
    }
}

fn soap_element(name: &str, prefix: Option<&str>, namespace: &str) -> Element {
    let mut element = Element::new(name);
    element.prefix = prefix.map(String::from);
    element.namespace = Some(namespace.to_string());
    element
}

fn element_at(children: &[XMLNode], idx: usize) -> Option<&Element> {
    match children.get(idx) {
        Some(XMLNode::Element(e)) => Some(e),
        _ => None,
    }
}

fn element_at_mut(children: &mut [XMLNode], idx: usize) -> Option<&mut Element> {
    match children.get_mut(idx) {
        Some(XMLNode::Element(e)) => Some(e),
        _ => None,
    }
}

/// Child elements of `parent`, skipping text and comments.
pub fn child_elements(parent: &Element) -> impl Iterator<Item = &Element> {
    parent.children.iter().filter_map(|node| match node {
        XMLNode::Element(e) => Some(e),
        _ => None,
    })
}
