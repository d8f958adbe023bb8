//! SOAP message handlers for client-side handler chains.
//!
//! Provides a handler template that dispatches on exchange direction, plus
//! helpers for writing values into the SOAP header of outbound requests.
//!
//! # Features
//!
//! - Direction classification from the message context
//! - Header section lookup/creation and header value injection
//! - Handler template with commit-on-request and failure hooks
//! - Response-only and header-writing specialized handlers
//! - Ordered handler chains configured from YAML
//! - SOAP Fault construction and inspection
//!
//! # Example
//!
//! ```ignore
//! use jcore_soap::{HandlerChain, HeaderRequestHandler, QName, SoapMessage,
//!     SoapMessageContext, SoapVersion, StaticHeader};
//!
//! let chain = HandlerChain::single(HeaderRequestHandler::new(StaticHeader::new(
//!     QName::new("urn:test", "Auth"),
//!     "token",
//!     "abc123",
//! )));
//! let mut ctx = SoapMessageContext::outbound(SoapMessage::new(SoapVersion::Soap11));
//! chain.handle_message(&mut ctx)?;
//! ```

pub mod chain;
pub mod classify;
pub mod config;
pub mod context;
pub mod diagnostics;
pub mod ensure;
pub mod error;
pub mod fault;
pub mod handler;
pub mod header;
pub mod message;
pub mod parser;

pub use chain::HandlerChain;
pub use config::{HandlerConfig, SoapVersion};
pub use context::{PropertyValue, SoapMessageContext, MESSAGE_OUTBOUND_PROPERTY};
pub use error::SoapError;
pub use handler::{
    HeaderRequestHandler, HeaderSource, ResponseHandler, ResponseOnly, SoapHandler, StaticHeader,
};
pub use header::QName;
pub use message::SoapMessage;
