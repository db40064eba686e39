//! Recipient resolution — the pure addressing decision
//!
//! Maps a validated message plus a session-directory snapshot onto a
//! delivery target, with four distinct addressing modes:
//!
//! | recipient | terminal | target                                         |
//! |-----------|----------|------------------------------------------------|
//! | empty     | empty    | the system console                             |
//! | empty     | `*`      | every session's terminal                       |
//! | empty     | name     | the first session on exactly that terminal     |
//! | user      | empty    | the user's first terminal                      |
//! | user      | `*`      | every terminal of that user                    |
//! | user      | name     | that user's session on exactly that terminal   |
//!
//! A refusal is only issued after the *entire* snapshot has been scanned:
//! a matching session late in the list must win no matter how many
//! non-matching sessions precede it.

use msp_types::{Message, TerminalSession};

use crate::error::DeliveryError;

/// Where a resolved message goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryTarget {
    /// The console-broadcast hook.
    Console,
    /// Terminal names to append to, in session order, each at most once.
    Terminals(Vec<Vec<u8>>),
}

/// Resolve `message` against a directory snapshot.
///
/// Pure: the snapshot is only read, and no sink is touched. The snapshot
/// must be fresh for this message cycle.
pub fn resolve(
    message: &Message,
    sessions: &[TerminalSession],
) -> Result<DeliveryTarget, DeliveryError> {
    if message.recipient.is_empty() {
        resolve_unaddressed(message, sessions)
    } else {
        resolve_for_user(message, sessions)
    }
}

/// No recipient named: console, broadcast, or an exact-terminal search over
/// every session.
fn resolve_unaddressed(
    message: &Message,
    sessions: &[TerminalSession],
) -> Result<DeliveryTarget, DeliveryError> {
    if message.recipient_terminal.is_empty() {
        return Ok(DeliveryTarget::Console);
    }

    if message.wants_every_terminal() {
        let mut terminals = Vec::new();
        for session in sessions {
            push_unique(&mut terminals, &session.terminal);
        }
        return Ok(DeliveryTarget::Terminals(terminals));
    }

    sessions
        .iter()
        .find(|session| session.terminal == message.recipient_terminal)
        .map(|session| DeliveryTarget::Terminals(vec![session.terminal.clone()]))
        .ok_or_else(|| DeliveryError::NoSuchTerminal {
            terminal: message.recipient_terminal_display(),
        })
}

/// A recipient was named: restrict the scan to that user's sessions first,
/// then apply the terminal field against the restricted set.
fn resolve_for_user(
    message: &Message,
    sessions: &[TerminalSession],
) -> Result<DeliveryTarget, DeliveryError> {
    let owned: Vec<&TerminalSession> = sessions
        .iter()
        .filter(|session| session.user == message.recipient)
        .collect();

    if owned.is_empty() {
        return Err(DeliveryError::UserNotAccessible {
            user: message.recipient_display(),
        });
    }

    if message.recipient_terminal.is_empty() {
        return Ok(DeliveryTarget::Terminals(vec![owned[0].terminal.clone()]));
    }

    if message.wants_every_terminal() {
        let mut terminals = Vec::new();
        for session in &owned {
            push_unique(&mut terminals, &session.terminal);
        }
        return Ok(DeliveryTarget::Terminals(terminals));
    }

    owned
        .iter()
        .find(|session| session.terminal == message.recipient_terminal)
        .map(|session| DeliveryTarget::Terminals(vec![session.terminal.clone()]))
        .ok_or_else(|| DeliveryError::NoTerminalNamed {
            terminal: message.recipient_terminal_display(),
        })
}

fn push_unique(terminals: &mut Vec<Vec<u8>>, terminal: &[u8]) {
    if !terminals.iter().any(|known| known == terminal) {
        terminals.push(terminal.to_vec());
    }
}
