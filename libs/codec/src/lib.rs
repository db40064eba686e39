//! # Message Codec — wire format rules
//!
//! The "rules" layer of the daemon: everything that decides whether a byte
//! buffer is a valid request frame lives here, and nothing here performs I/O.
//!
//! ## What this crate contains
//!
//! - [`parser::parse`] — frame validation and field extraction
//! - [`parser::encode`] — the inverse, for originating frames
//! - [`builder::MessageBuilder`] — fluent construction of outgoing frames
//! - [`cookie::generate_cookie`] — standalone timestamp-token generator
//! - [`error::CodecError`] — the framing/validation failure taxonomy
//!
//! ## What this crate does NOT contain
//!
//! - Socket handling or connection state (`services/daemon`)
//! - Recipient resolution or terminal writes (`msp-delivery`)
//!
//! ## Validation contract
//!
//! A buffer either yields a fully populated [`msp_types::Message`] or fails
//! with a [`error::CodecError`]; there is no partially-parsed result. The
//! two failure classes matter to callers: a malformed frame means the byte
//! stream did not even have the delimiter structure, while an unsupported
//! revision means a structurally sound frame asked for a protocol variant
//! this server does not speak.

pub mod builder;
pub mod cookie;
pub mod error;
pub mod parser;

pub use builder::MessageBuilder;
pub use cookie::generate_cookie;
pub use error::{CodecError, CookiePatternError};
pub use parser::{encode, parse};
