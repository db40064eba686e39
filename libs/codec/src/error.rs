//! Framing and validation failure taxonomy
//!
//! The `Display` text of [`CodecError`] goes onto the wire verbatim in the
//! failure acknowledgement, so the phrasing is part of the observable
//! protocol surface and is kept exactly as peers already expect it.

use thiserror::Error;

/// Why a byte buffer failed to become a [`msp_types::Message`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The buffer does not contain exactly the required number of field
    /// delimiters. Purely a framing failure — the content was never looked at.
    #[error("Message is malformed (not every part is present).")]
    MissingParts {
        /// Delimiters actually counted in the buffer.
        delimiters: usize,
    },

    /// The frame is structurally sound but its leading byte names a protocol
    /// revision this server does not accept.
    #[error("Only communication as described in the B protocol revision is currently accepted.")]
    UnsupportedRevision {
        /// The revision byte the client sent.
        found: u8,
    },
}

impl CodecError {
    /// True for failures of the delimiter structure itself, as opposed to
    /// semantically invalid content in a well-formed frame.
    pub fn is_malformed(&self) -> bool {
        matches!(self, CodecError::MissingParts { .. })
    }
}

/// A cookie pattern contained a conversion specifier the formatter does not
/// recognize. Never sent to peers; cookies are generated server-side.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unrecognized conversion specifier in cookie pattern {pattern:?}")]
pub struct CookiePatternError {
    pub pattern: String,
}
