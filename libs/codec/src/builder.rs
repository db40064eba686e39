//! Fluent construction of outgoing request frames
//!
//! The daemon itself only consumes frames, but tests, diagnostic tools, and
//! client code all need to originate them. The builder owns the field
//! bookkeeping so callers cannot produce a frame with fields out of order,
//! and it is the consumer of the cookie generator.

use msp_types::protocol_constants::{PROTOCOL_REVISION, WILDCARD_TERMINAL};
use msp_types::Message;

use crate::cookie::generate_default_cookie;
use crate::parser::encode;

/// Builds a [`Message`] (and its wire frame) field by field.
///
/// Every field defaults to empty, which on this wire format is always a
/// meaningful value rather than an error: an empty recipient addresses no
/// specific user, an empty terminal means "any terminal".
#[derive(Debug, Default, Clone)]
pub struct MessageBuilder {
    recipient: Vec<u8>,
    recipient_terminal: Vec<u8>,
    body: Vec<u8>,
    sender: Vec<u8>,
    sender_terminal: Vec<u8>,
    cookie: Vec<u8>,
    signature: Vec<u8>,
}

impl MessageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recipient(mut self, recipient: impl Into<Vec<u8>>) -> Self {
        self.recipient = recipient.into();
        self
    }

    pub fn recipient_terminal(mut self, terminal: impl Into<Vec<u8>>) -> Self {
        self.recipient_terminal = terminal.into();
        self
    }

    /// Address every terminal of the resolved user(s).
    pub fn every_terminal(mut self) -> Self {
        self.recipient_terminal = vec![WILDCARD_TERMINAL];
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn sender(mut self, sender: impl Into<Vec<u8>>) -> Self {
        self.sender = sender.into();
        self
    }

    pub fn sender_terminal(mut self, terminal: impl Into<Vec<u8>>) -> Self {
        self.sender_terminal = terminal.into();
        self
    }

    pub fn cookie(mut self, cookie: impl Into<Vec<u8>>) -> Self {
        self.cookie = cookie.into();
        self
    }

    /// Stamp a freshly generated local-time cookie into the frame.
    pub fn stamp_cookie(mut self) -> Self {
        self.cookie = generate_default_cookie();
        self
    }

    pub fn signature(mut self, signature: impl Into<Vec<u8>>) -> Self {
        self.signature = signature.into();
        self
    }

    pub fn build(self) -> Message {
        Message {
            protocol_revision: PROTOCOL_REVISION,
            recipient: self.recipient,
            recipient_terminal: self.recipient_terminal,
            body: self.body,
            sender: self.sender,
            sender_terminal: self.sender_terminal,
            cookie: self.cookie,
            signature: self.signature,
        }
    }

    /// Build and encode in one step.
    pub fn encode(self) -> Vec<u8> {
        encode(&self.build())
    }
}
