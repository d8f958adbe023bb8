//! Per-exchange message context supplied by the transport.

use crate::message::SoapMessage;
use std::collections::HashMap;

/// Property holding the exchange direction: `true` for an outbound request.
pub const MESSAGE_OUTBOUND_PROPERTY: &str = "message.outbound";

/// A context property value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Bool(bool),
    Integer(i64),
    Text(String),
}

impl PropertyValue {
    /// Short type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Integer(_) => "integer",
            Self::Text(_) => "text",
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// State for one request/response round trip: the message plus transport properties.
///
/// Handlers only borrow a context for the duration of a single call.
#[derive(Debug, Clone)]
pub struct SoapMessageContext {
    message: SoapMessage,
    properties: HashMap<String, PropertyValue>,
}

impl SoapMessageContext {
    /// Context with no properties; the direction is unset.
    pub fn new(message: SoapMessage) -> Self {
        Self {
            message,
            properties: HashMap::new(),
        }
    }

    /// Context for an outbound request.
    pub fn outbound(message: SoapMessage) -> Self {
        let mut ctx = Self::new(message);
        ctx.set_property(MESSAGE_OUTBOUND_PROPERTY, true);
        ctx
    }

    /// Context for an inbound response.
    pub fn inbound(message: SoapMessage) -> Self {
        let mut ctx = Self::new(message);
        ctx.set_property(MESSAGE_OUTBOUND_PROPERTY, false);
        ctx
    }

    pub fn message(&self) -> &SoapMessage {
        &self.message
    }

    pub fn message_mut(&mut self) -> &mut SoapMessage {
        &mut self.message
    }

    pub fn into_message(self) -> SoapMessage {
        self.message
    }

    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<PropertyValue>) {
        self.properties.insert(name.into(), value.into());
    }

    pub fn remove_property(&mut self, name: &str) -> Option<PropertyValue> {
        self.properties.remove(name)
    }
}
