//! The validated request message value type

use crate::protocol_constants::WILDCARD_TERMINAL;
use crate::text;

/// A fully validated request frame.
///
/// Constructed by `msp-codec` from a raw wire buffer (or by its builder when
/// originating messages); every field is populated exactly as it appeared on
/// the wire. Field contents are arbitrary octets — nothing here assumes UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Wire-format revision byte the frame was sent under.
    pub protocol_revision: u8,
    /// Addressed user; empty means no specific user.
    pub recipient: Vec<u8>,
    /// Addressed terminal; empty means any terminal of the resolved user(s),
    /// `*` means all of them.
    pub recipient_terminal: Vec<u8>,
    /// The note text.
    pub body: Vec<u8>,
    /// Originating user, as claimed by the client.
    pub sender: Vec<u8>,
    /// Originating terminal, as claimed by the client.
    pub sender_terminal: Vec<u8>,
    /// Opaque correlation/timestamp token.
    pub cookie: Vec<u8>,
    /// Reserved; carried but not validated.
    pub signature: Vec<u8>,
}

impl Message {
    /// True when the frame names neither a user nor a terminal — the
    /// console-broadcast case.
    pub fn is_console_broadcast(&self) -> bool {
        self.recipient.is_empty() && self.recipient_terminal.is_empty()
    }

    /// True when the terminal field is the wildcard.
    pub fn wants_every_terminal(&self) -> bool {
        self.recipient_terminal == [WILDCARD_TERMINAL]
    }

    /// Recipient rendered for error text and logs.
    pub fn recipient_display(&self) -> String {
        text::lossy(&self.recipient)
    }

    /// Recipient terminal rendered for error text and logs.
    pub fn recipient_terminal_display(&self) -> String {
        text::lossy(&self.recipient_terminal)
    }

    /// Sender rendered for the delivered note header.
    pub fn sender_display(&self) -> String {
        text::lossy(&self.sender)
    }
}
