//! # Message Daemon Types Library
//!
//! Pure data structures shared by the codec, delivery, and daemon crates.
//!
//! ## Design Philosophy
//!
//! - **No I/O**: this crate holds values and constants only; parsing lives in
//!   `msp-codec`, dispatch in `msp-delivery`
//! - **Bytes, not strings**: wire fields are arbitrary octet sequences and are
//!   kept as `Vec<u8>` end to end; they are rendered lossily only at the
//!   human-facing edges (terminal output, error text, logs)
//! - **Immutable values**: a [`Message`] is fully populated by the codec or
//!   not constructed at all — there is no partially-valid message

pub mod message;
pub mod protocol_constants;
pub mod session;
pub mod text;

pub use message::Message;
pub use protocol_constants::*;
pub use session::TerminalSession;
