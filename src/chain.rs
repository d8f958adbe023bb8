//! Ordered handler chains.

use crate::context::SoapMessageContext;
use crate::error::SoapError;
use crate::handler::SoapHandler;
use tracing::debug;

/// The handlers installed on one client, run in installation order.
#[derive(Default)]
pub struct HandlerChain {
    handlers: Vec<Box<dyn SoapHandler>>,
}

impl HandlerChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// A chain holding exactly `handler`.
    pub fn single(handler: impl SoapHandler + 'static) -> Self {
        Self::new().with_handler(handler)
    }

    /// Append a handler.
    pub fn with_handler(mut self, handler: impl SoapHandler + 'static) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Run every handler's `handle_message`, stopping at the first `false`.
    pub fn handle_message(&self, ctx: &mut SoapMessageContext) -> Result<bool, SoapError> {
        for (idx, handler) in self.handlers.iter().enumerate() {
            if !handler.handle_message(ctx)? {
                debug!(handler = idx, "Handler stopped message processing");
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Run every handler's `handle_fault`, stopping at the first `false`.
    pub fn handle_fault(&self, ctx: &SoapMessageContext) -> bool {
        for (idx, handler) in self.handlers.iter().enumerate() {
            if !handler.handle_fault(ctx) {
                debug!(handler = idx, "Handler stopped fault processing");
                return false;
            }
        }
        true
    }

    /// Close every handler, last installed first.
    pub fn close(&self, ctx: &SoapMessageContext) {
        for handler in self.handlers.iter().rev() {
            handler.close(ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SoapVersion;
    use crate::handler::{HeaderRequestHandler, StaticHeader};
    use crate::header::QName;
    use crate::message::{child_elements, SoapMessage};
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder {
        id: &'static str,
        verdict: bool,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl SoapHandler for Recorder {
        fn process_request(&self, _ctx: &mut SoapMessageContext) -> Result<bool, SoapError> {
            self.log.borrow_mut().push(format!("request:{}", self.id));
            Ok(self.verdict)
        }

        fn process_response(&self, _ctx: &mut SoapMessageContext) -> Result<bool, SoapError> {
            self.log.borrow_mut().push(format!("response:{}", self.id));
            Ok(self.verdict)
        }

        fn close(&self, _ctx: &SoapMessageContext) {
            self.log.borrow_mut().push(format!("close:{}", self.id));
        }
    }

    fn recorder(id: &'static str, verdict: bool, log: &Rc<RefCell<Vec<String>>>) -> Recorder {
        Recorder {
            id,
            verdict,
            log: Rc::clone(log),
        }
    }

    #[test]
    fn test_empty_chain_continues() {
        let chain = HandlerChain::new();
        let mut ctx = SoapMessageContext::outbound(SoapMessage::new(SoapVersion::Soap11));
        assert!(chain.is_empty());
        assert!(chain.handle_message(&mut ctx).unwrap());
        assert!(chain.handle_fault(&ctx));
    }

    #[test]
    fn test_stops_at_first_false() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let chain = HandlerChain::new()
            .with_handler(recorder("a", true, &log))
            .with_handler(recorder("b", false, &log))
            .with_handler(recorder("c", true, &log));

        let mut ctx = SoapMessageContext::inbound(SoapMessage::new(SoapVersion::Soap11));
        assert!(!chain.handle_message(&mut ctx).unwrap());
        assert_eq!(*log.borrow(), vec!["response:a", "response:b"]);
    }

    #[test]
    fn test_close_runs_in_reverse() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let chain = HandlerChain::new()
            .with_handler(recorder("a", true, &log))
            .with_handler(recorder("b", true, &log));

        let ctx = SoapMessageContext::outbound(SoapMessage::new(SoapVersion::Soap11));
        chain.close(&ctx);
        assert_eq!(*log.borrow(), vec!["close:b", "close:a"]);
    }

    #[test]
    fn test_header_handlers_stack_entries() {
        let chain = HandlerChain::single(HeaderRequestHandler::new(StaticHeader::new(
            QName::new("urn:test", "Auth"),
            "token",
            "abc123",
        )))
        .with_handler(HeaderRequestHandler::new(StaticHeader::new(
            QName::new("urn:trace", "Trace"),
            "id",
            "t-1",
        )));

        let mut ctx = SoapMessageContext::outbound(SoapMessage::new(SoapVersion::Soap11));
        assert!(chain.handle_message(&mut ctx).unwrap());

        let names: Vec<_> = child_elements(ctx.message().header().unwrap())
            .map(|e| e.name.clone())
            .collect();
        assert_eq!(names, vec!["Auth", "Trace"]);
        // Each handler commits its own request pass
        assert_eq!(ctx.message().save_count(), 2);
    }
}
