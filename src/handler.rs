//! SOAP handler template and its specialized forms.
//!
//! A [`SoapHandler`] supplies two hooks, [`SoapHandler::process_request`] and
//! [`SoapHandler::process_response`]. The shared [`dispatch`] routine picks one
//! by exchange direction, commits outbound messages, and routes protocol
//! failures into [`SoapHandler::process_failure`].
//!
//! # Example
//!
//! ```ignore
//! use jcore_soap::{HeaderRequestHandler, QName, SoapHandler, StaticHeader};
//!
//! let handler = HeaderRequestHandler::new(StaticHeader::new(
//!     QName::new("urn:test", "Auth"),
//!     "token",
//!     "abc123",
//! ));
//! assert!(handler.handle_message(&mut ctx)?);
//! ```

use crate::classify::is_request;
use crate::context::SoapMessageContext;
use crate::diagnostics::{debug_context, error_context};
use crate::error::SoapError;
use crate::fault::SoapFault;
use crate::header::{add_context_header_value, QName};
use std::collections::HashSet;
use tracing::{error, trace};

/// A handler in a SOAP handler chain.
pub trait SoapHandler {
    /// Handle an outbound request.
    fn process_request(&self, ctx: &mut SoapMessageContext) -> Result<bool, SoapError>;

    /// Handle an inbound response.
    fn process_response(&self, ctx: &mut SoapMessageContext) -> Result<bool, SoapError>;

    /// Called once for every protocol failure raised by either hook.
    fn process_failure(&self, err: &SoapError) {
        log_failure(err);
    }

    /// Header names this handler understands. `None`: it declares none.
    fn headers(&self) -> Option<HashSet<QName>> {
        None
    }

    /// Process one message; `Ok(false)` stops the chain.
    ///
    /// Protocol failures become `Ok(false)`. Precondition violations propagate.
    fn handle_message(&self, ctx: &mut SoapMessageContext) -> Result<bool, SoapError> {
        dispatch(self, ctx)
    }

    /// Record a delivery fault. Always acknowledged.
    fn handle_fault(&self, ctx: &SoapMessageContext) -> bool {
        acknowledge_fault(ctx)
    }

    /// End of the exchange.
    fn close(&self, _ctx: &SoapMessageContext) {
        trace!("Request to close message context");
    }
}

/// Route `ctx` to the request or response hook of `handler`.
///
/// The request path commits the message after the hook succeeds. The response
/// path never commits. A protocol failure from either hook (or from the
/// commit) skips the commit, reaches `process_failure` once, and yields `false`.
pub fn dispatch<H>(handler: &H, ctx: &mut SoapMessageContext) -> Result<bool, SoapError>
where
    H: SoapHandler + ?Sized,
{
    debug_context("Attempting to process", ctx);

    let outcome = if is_request(ctx)? {
        match handler.process_request(ctx) {
            Ok(result) => ctx.message_mut().save_changes().map(|()| result),
            Err(e) => Err(e),
        }
    } else {
        handler.process_response(ctx)
    };

    match outcome {
        Ok(result) => Ok(result),
        Err(e) if e.is_protocol() => {
            error_context("Failed to process", ctx);
            handler.process_failure(&e);
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

/// Log the fault carried by `ctx` and acknowledge it.
pub fn acknowledge_fault(ctx: &SoapMessageContext) -> bool {
    match SoapFault::from_message(ctx.message()) {
        Some(fault) => error!(
            code = %fault.code,
            reason = %fault.reason,
            "Received a SOAP fault"
        ),
        None => error!("Received a SOAP fault without a Fault body"),
    }
    error_context("Received a SOAP fault for message context", ctx);
    true
}

fn log_failure(err: &SoapError) {
    error!(error = %err, "Problem handling msg");
}

/// A handler that only acts on responses.
pub trait ResponseHandler {
    fn process_response(&self, ctx: &mut SoapMessageContext) -> Result<bool, SoapError>;

    fn process_failure(&self, err: &SoapError) {
        log_failure(err);
    }
}

/// Adapts a [`ResponseHandler`]: requests are accepted untouched.
#[derive(Debug, Clone, Default)]
pub struct ResponseOnly<H>(pub H);

impl<H: ResponseHandler> SoapHandler for ResponseOnly<H> {
    fn process_request(&self, _ctx: &mut SoapMessageContext) -> Result<bool, SoapError> {
        Ok(true)
    }

    fn process_response(&self, ctx: &mut SoapMessageContext) -> Result<bool, SoapError> {
        self.0.process_response(ctx)
    }

    fn process_failure(&self, err: &SoapError) {
        self.0.process_failure(err);
    }
}

/// Supplies the header written on every outbound request.
pub trait HeaderSource {
    /// Qualified name of the header element
    fn header_name(&self) -> &QName;

    /// Name of the child element
    fn name(&self) -> &str;

    /// Text of the child element
    fn value(&self) -> &str;
}

/// Writes `<header_name><name>value</name></header_name>` into every outbound request.
#[derive(Debug, Clone)]
pub struct HeaderRequestHandler<S> {
    source: S,
}

impl<S: HeaderSource> HeaderRequestHandler<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S: HeaderSource> SoapHandler for HeaderRequestHandler<S> {
    fn process_request(&self, ctx: &mut SoapMessageContext) -> Result<bool, SoapError> {
        add_context_header_value(
            ctx,
            self.source.header_name(),
            self.source.name(),
            self.source.value(),
        )?;
        Ok(true)
    }

    fn process_response(&self, _ctx: &mut SoapMessageContext) -> Result<bool, SoapError> {
        Ok(true)
    }
}

/// A fixed header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticHeader {
    header_name: QName,
    name: String,
    value: String,
}

impl StaticHeader {
    pub fn new(header_name: QName, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            header_name,
            name: name.into(),
            value: value.into(),
        }
    }
}

impl HeaderSource for StaticHeader {
    fn header_name(&self) -> &QName {
        &self.header_name
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self) -> &str {
        &self.value
    }
}
