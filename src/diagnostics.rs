//! Rendering of message exchanges for logs.

use crate::context::SoapMessageContext;
use crate::message::SoapMessage;
use tracing::{debug, error, warn, Level};

/// Serialize `message` for a log line. Rendering failures never escape.
pub fn render_message(message: &SoapMessage) -> String {
    match message.to_xml_string() {
        Ok(xml) => xml,
        Err(e) => {
            warn!(error = %e, "Trouble rendering SOAP message");
            "<unrenderable SOAP message>".to_string()
        }
    }
}

pub fn render_context(ctx: &SoapMessageContext) -> String {
    render_message(ctx.message())
}

/// Log the exchange at debug level, rendering it only when debug is enabled.
pub fn debug_context(event: &str, ctx: &SoapMessageContext) {
    if tracing::enabled!(Level::DEBUG) {
        debug!(soap = %render_context(ctx), "{}", event);
    }
}

/// Log the exchange at error level.
pub fn error_context(event: &str, ctx: &SoapMessageContext) {
    if tracing::enabled!(Level::ERROR) {
        error!(soap = %render_context(ctx), "{}", event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SoapVersion;

    #[test]
    fn test_render_context() {
        let ctx = SoapMessageContext::outbound(SoapMessage::new(SoapVersion::Soap11));
        let rendered = render_context(&ctx);
        assert!(rendered.contains("Envelope"));
        assert!(rendered.contains("Body"));
    }
}
