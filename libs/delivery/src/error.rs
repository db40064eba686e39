//! Delivery failure taxonomy
//!
//! [`DeliveryError`]'s `Display` text is what the peer reads in the failure
//! acknowledgement, so the addressing variants keep their established wire
//! phrasing verbatim.

use thiserror::Error;

/// Why an append to a terminal or console device failed.
///
/// Carries the rendered I/O failure rather than the `std::io::Error` itself
/// so sink results stay `Clone` for recording and retry layers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// The terminal name cannot name a device under the device root.
    #[error("terminal name {name:?} does not name a device")]
    InvalidTerminalName { name: String },

    /// The underlying device write failed.
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for SinkError {
    fn from(err: std::io::Error) -> Self {
        SinkError::Io(err.to_string())
    }
}

/// Why a validated message could not be delivered.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// No recipient was named and no logged-in session has the requested
    /// terminal.
    #[error("There is no such terminal as {terminal}.")]
    NoSuchTerminal { terminal: String },

    /// The recipient is logged in, but none of their sessions has the
    /// requested terminal.
    #[error("There is no terminal named {terminal}.")]
    NoTerminalNamed { terminal: String },

    /// The recipient has no logged-in session at all.
    #[error("User {user} is not accessible for writing to his terminal")]
    UserNotAccessible { user: String },

    /// Addressing resolved, but appending to a terminal device failed.
    #[error("Could not write the message to terminal {terminal}.")]
    TerminalWrite {
        terminal: String,
        #[source]
        source: SinkError,
    },

    /// Addressing resolved to the console, but the console append failed.
    #[error("Could not write the message to the console.")]
    ConsoleWrite {
        #[source]
        source: SinkError,
    },
}
