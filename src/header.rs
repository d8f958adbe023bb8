//! SOAP header injection.

use crate::context::SoapMessageContext;
use crate::ensure::{ensure_ncname, ensure_string, is_blank};
use crate::error::SoapError;
use std::fmt;
use tracing::trace;
use xmltree::{Element, Namespace, XMLNode};

/// A namespace-qualified element name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    /// Namespace URI, empty for none
    pub namespace: String,
    pub local_name: String,
    /// Serialization prefix; the namespace becomes the default one when absent.
    /// Only valid together with a namespace.
    pub prefix: Option<String>,
}

impl QName {
    pub fn new(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            local_name: local_name.into(),
            prefix: None,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Build an empty element carrying this name and its namespace declaration.
    fn to_element(&self) -> Element {
        let mut element = Element::new(&self.local_name);
        if !self.namespace.is_empty() {
            element.namespace = Some(self.namespace.clone());
            element.prefix = self.prefix.clone();

            let mut namespaces = Namespace::empty();
            namespaces.put(self.prefix.as_deref().unwrap_or(""), self.namespace.as_str());
            element.namespaces = Some(namespaces);
        }
        element
    }

    /// Namespace inherited by unprefixed children of this element.
    fn default_namespace(&self) -> Option<&str> {
        if self.prefix.is_none() && !self.namespace.is_empty() {
            Some(&self.namespace)
        } else {
            None
        }
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.local_name)
        } else {
            write!(f, "{{{}}}{}", self.namespace, self.local_name)
        }
    }
}

/// Return the context's header section, creating it when the envelope has none.
pub fn get_or_create_header(ctx: &mut SoapMessageContext) -> Result<&mut Element, SoapError> {
    let existed = ctx.message().header().is_some();
    let header = ctx.message_mut().get_or_create_header()?;
    trace!(created = !existed, "Resolved SOAP header");
    Ok(header)
}

/// Missing pieces are invalid arguments; names that cannot be written as XML
/// are protocol failures.
fn check_entry(qname: &QName, name: &str, value: &str) -> Result<(), SoapError> {
    if is_blank(&qname.local_name) {
        return Err(SoapError::invalid_argument("Must provide a QName!"));
    }
    if qname.prefix.is_some() && qname.namespace.is_empty() {
        return Err(SoapError::invalid_argument(format!(
            "QName {} has a prefix but no namespace",
            qname
        )));
    }
    ensure_string(name, "Must provide a name")?;
    ensure_string(value, "Must provide a value")?;

    ensure_ncname(&qname.local_name, "header name")?;
    if let Some(ref prefix) = qname.prefix {
        ensure_ncname(prefix, "header prefix")?;
    }
    ensure_ncname(name, "header child name")?;
    Ok(())
}

/// Append `<qname><name>value</name></qname>` to `header`.
///
/// Every call appends a fresh chain; existing entries with the same names are
/// left in place. Arguments are validated before the header is touched.
pub fn add_header_value(
    header: &mut Element,
    qname: &QName,
    name: &str,
    value: &str,
) -> Result<(), SoapError> {
    if header.name != "Header" {
        return Err(SoapError::invalid_argument("Must provide a soap header!"));
    }
    check_entry(qname, name, value)?;

    trace!(qname = %qname, name, value, "Adding header value");

    let mut entry = Element::new(name);
    entry.namespace = qname.default_namespace().map(String::from);
    entry.children.push(XMLNode::Text(value.to_string()));

    let mut outer = qname.to_element();
    outer.children.push(XMLNode::Element(entry));

    header.children.push(XMLNode::Element(outer));
    Ok(())
}

/// Resolve the context's header section and append a value to it.
///
/// Nothing is created on the message when the arguments are invalid.
pub fn add_context_header_value(
    ctx: &mut SoapMessageContext,
    qname: &QName,
    name: &str,
    value: &str,
) -> Result<(), SoapError> {
    check_entry(qname, name, value)?;
    let header = get_or_create_header(ctx)?;
    add_header_value(header, qname, name, value)
}
