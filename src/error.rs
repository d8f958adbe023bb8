//! Error types for SOAP message handling.

use thiserror::Error;

/// SOAP handling errors.
#[derive(Error, Debug)]
pub enum SoapError {
    /// A required argument was missing or blank.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A context property held a value of the wrong type.
    #[error("Property '{name}' holds a {found} value, expected {expected}")]
    PropertyType {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("XML parsing error: {0}")]
    XmlParse(String),

    #[error("Invalid SOAP envelope: {0}")]
    InvalidEnvelope(String),

    /// Failure while manipulating a message during request/response processing.
    #[error("SOAP processing error: {0}")]
    Protocol(String),

    #[error("XML serialization error: {0}")]
    Serialize(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SoapError {
    /// Build an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Build a protocol-level error.
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol(message.into())
    }

    /// Whether this error is a protocol-level failure.
    ///
    /// Protocol failures are absorbed by the handler template and reported as a
    /// `false` result. Everything else is a caller error and propagates.
    pub fn is_protocol(&self) -> bool {
        matches!(
            self,
            Self::XmlParse(_) | Self::InvalidEnvelope(_) | Self::Protocol(_) | Self::Serialize(_)
        )
    }
}

impl From<xmltree::ParseError> for SoapError {
    fn from(err: xmltree::ParseError) -> Self {
        Self::XmlParse(err.to_string())
    }
}

impl From<xmltree::Error> for SoapError {
    fn from(err: xmltree::Error) -> Self {
        Self::Serialize(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_classification() {
        assert!(SoapError::protocol("boom").is_protocol());
        assert!(SoapError::XmlParse("bad".into()).is_protocol());
        assert!(SoapError::InvalidEnvelope("bad".into()).is_protocol());
        assert!(SoapError::Serialize("bad".into()).is_protocol());
        assert!(!SoapError::invalid_argument("Must provide a name").is_protocol());
        assert!(!SoapError::Config("bad".into()).is_protocol());
        assert!(!SoapError::PropertyType {
            name: "x".into(),
            expected: "bool",
            found: "text",
        }
        .is_protocol());
    }

    #[test]
    fn test_display() {
        let err = SoapError::invalid_argument("Must provide a value");
        assert_eq!(err.to_string(), "Invalid argument: Must provide a value");

        let err = SoapError::PropertyType {
            name: "message.outbound".into(),
            expected: "bool",
            found: "text",
        };
        assert_eq!(
            err.to_string(),
            "Property 'message.outbound' holds a text value, expected bool"
        );
    }
}
