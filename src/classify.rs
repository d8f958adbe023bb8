//! Exchange direction classification.

use crate::context::{PropertyValue, SoapMessageContext, MESSAGE_OUTBOUND_PROPERTY};
use crate::error::SoapError;
use tracing::trace;

/// Interpret a direction property value. Absent means response.
pub fn is_request_value(value: Option<&PropertyValue>) -> Result<bool, SoapError> {
    let is_request = match value {
        None => false,
        Some(PropertyValue::Bool(b)) => *b,
        Some(other) => {
            return Err(SoapError::PropertyType {
                name: MESSAGE_OUTBOUND_PROPERTY.to_string(),
                expected: "bool",
                found: other.type_name(),
            })
        }
    };
    trace!(is_request, value = ?value, "Classified direction value");
    Ok(is_request)
}

/// Whether `ctx` carries an outbound request.
///
/// An unset direction property is treated as an inbound response. A property of
/// any type other than boolean is a transport error.
pub fn is_request(ctx: &SoapMessageContext) -> Result<bool, SoapError> {
    is_request_value(ctx.property(MESSAGE_OUTBOUND_PROPERTY))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SoapVersion;
    use crate::message::SoapMessage;

    fn ctx() -> SoapMessageContext {
        SoapMessageContext::new(SoapMessage::new(SoapVersion::Soap11))
    }

    #[test]
    fn test_unset_is_response() {
        assert!(!is_request(&ctx()).unwrap());
        assert!(!is_request_value(None).unwrap());
    }

    #[test]
    fn test_bool_passthrough() {
        let mut c = ctx();
        c.set_property(MESSAGE_OUTBOUND_PROPERTY, true);
        assert!(is_request(&c).unwrap());

        c.set_property(MESSAGE_OUTBOUND_PROPERTY, false);
        assert!(!is_request(&c).unwrap());
    }

    #[test]
    fn test_wrong_type_is_error() {
        let mut c = ctx();
        c.set_property(MESSAGE_OUTBOUND_PROPERTY, "yes");

        let err = is_request(&c).unwrap_err();
        assert!(matches!(err, SoapError::PropertyType { found: "text", .. }));
        assert!(!err.is_protocol());
    }
}
