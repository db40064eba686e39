//! Request frame parsing and encoding
//!
//! ## Wire format
//!
//! A request frame is a sequence of eight fields separated by exactly seven
//! NUL octets. The first field is the protocol revision byte immediately
//! followed by the recipient name, with no delimiter between them; the
//! remaining fields map positionally:
//!
//! ```text
//! B<recipient> NUL <recip-term> NUL <body> NUL <sender> NUL <sender-term> NUL <cookie> NUL <signature> NUL
//! ```
//!
//! Splitting seven delimiters produces one trailing segment beyond the
//! mapped fields (normally empty, when the signature is NUL-terminated as
//! above). That segment, and anything after it, is ignored: a frame is
//! judged by its delimiter count, not by how much follows the last mapped
//! field.
//!
//! ## Validation order
//!
//! 1. Count delimiters; anything but seven is a malformed frame, regardless
//!    of content.
//! 2. Check the leading revision byte.
//! 3. Split on the delimiter and assign segments positionally.
//!
//! Steps 1–2 deliberately precede the split so the two failure classes are
//! distinguishable to the byte: a frame with the wrong shape is never
//! reported as a revision problem and vice versa.

use msp_types::protocol_constants::{FIELD_DELIMITER, PROTOCOL_REVISION, REQUIRED_DELIMITERS};
use msp_types::Message;

use crate::error::CodecError;

/// Parse and validate one request frame.
///
/// Consumes the whole buffer in a single pass; no side effects, no partial
/// results.
pub fn parse(buffer: &[u8]) -> Result<Message, CodecError> {
    let delimiters = buffer
        .iter()
        .filter(|byte| **byte == FIELD_DELIMITER)
        .count();
    if delimiters != REQUIRED_DELIMITERS {
        return Err(CodecError::MissingParts { delimiters });
    }

    // Seven delimiters guarantee a non-empty buffer, so indexing the first
    // byte cannot fail here.
    if buffer[0] != PROTOCOL_REVISION {
        return Err(CodecError::UnsupportedRevision { found: buffer[0] });
    }

    let mut segments = buffer.split(|byte| *byte == FIELD_DELIMITER);

    // Segment 0 carries the revision byte plus the recipient.
    let head = segments.next().unwrap_or_default();
    let recipient = head.get(1..).unwrap_or_default().to_vec();

    let mut next_field = || segments.next().unwrap_or_default().to_vec();

    Ok(Message {
        protocol_revision: PROTOCOL_REVISION,
        recipient,
        recipient_terminal: next_field(),
        body: next_field(),
        sender: next_field(),
        sender_terminal: next_field(),
        cookie: next_field(),
        signature: next_field(),
    })
}

/// Encode a message back into wire form: the exact inverse of [`parse`] for
/// messages whose fields contain no delimiter octet.
///
/// The signature field is NUL-terminated like every other field, which
/// yields the required seven delimiters and an empty trailing segment.
pub fn encode(message: &Message) -> Vec<u8> {
    let tail: [&[u8]; 6] = [
        &message.recipient_terminal,
        &message.body,
        &message.sender,
        &message.sender_terminal,
        &message.cookie,
        &message.signature,
    ];

    let len = 1
        + message.recipient.len()
        + tail.iter().map(|field| field.len() + 1).sum::<usize>()
        + 1;
    let mut frame = Vec::with_capacity(len);

    frame.push(message.protocol_revision);
    frame.extend_from_slice(&message.recipient);
    for field in tail {
        frame.push(FIELD_DELIMITER);
        frame.extend_from_slice(field);
    }
    frame.push(FIELD_DELIMITER);
    frame
}
