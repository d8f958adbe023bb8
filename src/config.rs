//! Configuration types for header-writing handler chains.

use crate::chain::HandlerChain;
use crate::ensure::{is_blank, is_ncname};
use crate::error::SoapError;
use crate::handler::{HeaderRequestHandler, StaticHeader};
use crate::header::QName;
use crate::parser::{SOAP_11_NS, SOAP_12_NS};
use serde::{Deserialize, Serialize};

/// Main configuration: the headers to stamp onto outbound requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HandlerConfig {
    /// Config version
    pub version: String,

    /// General settings
    pub settings: SettingsConfig,

    /// One header-writing handler per entry, installed in order
    pub headers: Vec<HeaderEntryConfig>,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            version: "1".to_string(),
            settings: SettingsConfig::default(),
            headers: Vec::new(),
        }
    }
}

impl HandlerConfig {
    /// Parse a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, SoapError> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| SoapError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject entries that could never be written.
    pub fn validate(&self) -> Result<(), SoapError> {
        for (idx, entry) in self.headers.iter().enumerate() {
            if is_blank(&entry.local_name) {
                return Err(SoapError::Config(format!("headers[{}]: local_name is blank", idx)));
            }
            if is_blank(&entry.name) {
                return Err(SoapError::Config(format!("headers[{}]: name is blank", idx)));
            }
            if is_blank(&entry.value) {
                return Err(SoapError::Config(format!("headers[{}]: value is blank", idx)));
            }
            if !is_ncname(&entry.local_name) {
                return Err(SoapError::Config(format!(
                    "headers[{}]: local_name '{}' is not a valid XML name",
                    idx, entry.local_name
                )));
            }
            if !is_ncname(&entry.name) {
                return Err(SoapError::Config(format!(
                    "headers[{}]: name '{}' is not a valid XML name",
                    idx, entry.name
                )));
            }
            if let Some(ref prefix) = entry.prefix {
                if entry.namespace.is_empty() {
                    return Err(SoapError::Config(format!(
                        "headers[{}]: prefix '{}' requires a namespace",
                        idx, prefix
                    )));
                }
                if !is_ncname(prefix) {
                    return Err(SoapError::Config(format!(
                        "headers[{}]: prefix '{}' is not a valid XML name",
                        idx, prefix
                    )));
                }
            }
        }
        Ok(())
    }

    /// Build a chain holding one header-writing handler per configured entry.
    pub fn build_chain(&self) -> HandlerChain {
        self.headers
            .iter()
            .fold(HandlerChain::new(), |chain, entry| {
                chain.with_handler(HeaderRequestHandler::new(entry.to_static_header()))
            })
    }
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    /// SOAP version used when no input message is supplied
    pub soap_version: SoapVersion,

    /// Indent the committed message
    pub pretty_print: bool,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            soap_version: SoapVersion::Soap11,
            pretty_print: true,
        }
    }
}

/// SOAP versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoapVersion {
    /// SOAP 1.1 (namespace: http://schemas.xmlsoap.org/soap/envelope/)
    #[serde(rename = "1.1")]
    Soap11,
    /// SOAP 1.2 (namespace: http://www.w3.org/2003/05/soap-envelope)
    #[serde(rename = "1.2")]
    Soap12,
}

impl SoapVersion {
    /// Envelope namespace URI.
    pub fn namespace(&self) -> &'static str {
        match self {
            Self::Soap11 => SOAP_11_NS,
            Self::Soap12 => SOAP_12_NS,
        }
    }

    /// Resolve a version from its envelope namespace URI.
    pub fn from_namespace(ns: &str) -> Option<Self> {
        match ns {
            SOAP_11_NS => Some(Self::Soap11),
            SOAP_12_NS => Some(Self::Soap12),
            _ => None,
        }
    }
}

/// A header value written under `{namespace}local_name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderEntryConfig {
    /// Namespace of the header element
    #[serde(default)]
    pub namespace: String,

    /// Local name of the header element
    pub local_name: String,

    /// Prefix used when serializing the header element
    #[serde(default)]
    pub prefix: Option<String>,

    /// Child element name
    pub name: String,

    /// Child element text
    pub value: String,
}

impl HeaderEntryConfig {
    fn to_static_header(&self) -> StaticHeader {
        let mut qname = QName::new(self.namespace.clone(), self.local_name.clone());
        if let Some(ref prefix) = self.prefix {
            qname = qname.with_prefix(prefix.clone());
        }
        StaticHeader::new(qname, self.name.clone(), self.value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HandlerConfig::default();
        assert_eq!(config.version, "1");
        assert_eq!(config.settings.soap_version, SoapVersion::Soap11);
        assert!(config.settings.pretty_print);
        assert!(config.headers.is_empty());
        assert!(config.build_chain().is_empty());
    }

    #[test]
    fn test_config_serialization() {
        let config = HandlerConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: HandlerConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.settings.soap_version, config.settings.soap_version);
    }

    #[test]
    fn test_config_from_yaml() {
        let yaml = r#"
version: "1"
settings:
  soap_version: "1.2"
  pretty_print: false
headers:
  - namespace: "urn:test"
    local_name: "Auth"
    prefix: "auth"
    name: "token"
    value: "abc123"
  - namespace: "urn:trace"
    local_name: "Trace"
    name: "id"
    value: "t-1"
"#;
        let config = HandlerConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.settings.soap_version, SoapVersion::Soap12);
        assert!(!config.settings.pretty_print);
        assert_eq!(config.headers.len(), 2);
        assert_eq!(config.headers[0].prefix.as_deref(), Some("auth"));
        assert!(config.headers[1].prefix.is_none());
        assert_eq!(config.build_chain().len(), 2);
    }

    #[test]
    fn test_config_rejects_blank_value() {
        let yaml = r#"
headers:
  - namespace: "urn:test"
    local_name: "Auth"
    name: "token"
    value: "   "
"#;
        let err = HandlerConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, SoapError::Config(ref m) if m.contains("value")));
    }

    #[test]
    fn test_config_rejects_invalid_xml_names() {
        let yaml = r#"
headers:
  - namespace: "urn:test"
    local_name: "Auth"
    name: "a<b"
    value: "abc"
"#;
        let err = HandlerConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, SoapError::Config(ref m) if m.contains("not a valid XML name")));

        let yaml = r#"
headers:
  - local_name: "Auth"
    prefix: "a"
    name: "token"
    value: "abc"
"#;
        let err = HandlerConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, SoapError::Config(ref m) if m.contains("requires a namespace")));
    }

    #[test]
    fn test_soap_version_namespace() {
        assert_eq!(SoapVersion::Soap11.namespace(), SOAP_11_NS);
        assert_eq!(SoapVersion::from_namespace(SOAP_12_NS), Some(SoapVersion::Soap12));
        assert_eq!(SoapVersion::from_namespace("urn:other"), None);
    }
}
