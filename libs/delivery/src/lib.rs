//! # Delivery — from validated message to terminal bytes
//!
//! Everything between a parsed [`msp_types::Message`] and octets landing on
//! a terminal device:
//!
//! - the collaborator traits ([`SessionDirectory`], [`TerminalSink`],
//!   [`ConsoleSink`]) that abstract who is logged in and how text reaches a
//!   device
//! - [`resolver`] — the pure addressing decision (which terminals, or the
//!   console, or a refusal)
//! - [`format`] — the bordered note renderer
//! - [`Dispatcher`] — glue that snapshots the directory, resolves, formats
//!   once, and appends to every resolved sink
//! - Unix-backed collaborators ([`directory::UtmpSessionDirectory`],
//!   [`sinks::DevTerminalSink`], [`sinks::DevConsoleSink`]) and in-memory
//!   doubles ([`test_utils`]) for exercising the daemon without a real
//!   `/dev`
//!
//! Resolution failures here are always *semantic* ("that user is not logged
//! in"), never framing failures — a message that reaches this crate already
//! passed the codec.

use std::fmt::Debug;

use async_trait::async_trait;

use msp_types::TerminalSession;

pub mod dispatcher;
pub mod error;
pub mod format;
pub mod resolver;
pub mod sinks;
pub mod test_utils;

#[cfg(unix)]
pub mod directory;

pub use dispatcher::Dispatcher;
pub use error::{DeliveryError, SinkError};
pub use format::format_note;
pub use resolver::{resolve, DeliveryTarget};

/// Source of the current logged-in user/terminal mapping.
///
/// Implementations return a fresh snapshot on every call; the caller never
/// caches one across message cycles because logins change between messages.
pub trait SessionDirectory: Send + Sync + Debug {
    fn current_sessions(&self) -> Vec<TerminalSession>;
}

/// A destination terminal device text can be appended to.
///
/// Appends are best-effort: a failed append is reported to the caller but
/// must leave the sink usable for the next delivery.
#[async_trait]
pub trait TerminalSink: Send + Sync + Debug {
    async fn append(&self, terminal: &[u8], text: &str) -> Result<(), SinkError>;
}

/// The system console, target of the otherwise-unaddressed broadcast case.
#[async_trait]
pub trait ConsoleSink: Send + Sync + Debug {
    async fn append(&self, text: &str) -> Result<(), SinkError>;
}
