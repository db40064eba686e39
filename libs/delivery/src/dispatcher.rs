//! Dispatch — resolve once, format once, append everywhere
//!
//! The dispatcher owns the collaborator handles and drives one delivery per
//! validated message: snapshot the directory, resolve the addressing, render
//! the note, and append it to each resolved sink. Each delivery call writes
//! the whole formatted block to a sink in a single append, so concurrent
//! sessions interleave at block granularity at worst.

use std::sync::Arc;

use tracing::{debug, warn};

use msp_types::{text, Message};

use crate::error::DeliveryError;
use crate::format::format_note;
use crate::resolver::{resolve, DeliveryTarget};
use crate::{ConsoleSink, SessionDirectory, TerminalSink};

/// Glue between the resolver and the sinks; one per daemon, shared by every
/// connection task.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    directory: Arc<dyn SessionDirectory>,
    terminals: Arc<dyn TerminalSink>,
    console: Arc<dyn ConsoleSink>,
    columns: usize,
}

impl Dispatcher {
    pub fn new(
        directory: Arc<dyn SessionDirectory>,
        terminals: Arc<dyn TerminalSink>,
        console: Arc<dyn ConsoleSink>,
        columns: usize,
    ) -> Self {
        Self {
            directory,
            terminals,
            console,
            columns,
        }
    }

    /// Deliver one message.
    ///
    /// The directory is snapshotted fresh for this call — logins may have
    /// changed since the previous message on the same connection. A sink
    /// failure on one terminal does not stop the remaining targets from
    /// being attempted; the first failure is what the peer hears about.
    pub async fn deliver(&self, message: &Message) -> Result<(), DeliveryError> {
        let sessions = self.directory.current_sessions();
        let target = resolve(message, &sessions)?;
        let note = format_note(&message.sender, &message.body, self.columns);

        match target {
            DeliveryTarget::Console => {
                debug!(sender = %message.sender_display(), "routing to console");
                self.console
                    .append(&note)
                    .await
                    .map_err(|source| DeliveryError::ConsoleWrite { source })
            }
            DeliveryTarget::Terminals(terminals) => {
                let mut first_failure = None;

                for terminal in &terminals {
                    match self.terminals.append(terminal, &note).await {
                        Ok(()) => {
                            debug!(terminal = %text::lossy(terminal), "note appended");
                        }
                        Err(source) => {
                            warn!(
                                terminal = %text::lossy(terminal),
                                error = %source,
                                "terminal append failed"
                            );
                            if first_failure.is_none() {
                                first_failure = Some(DeliveryError::TerminalWrite {
                                    terminal: text::lossy(terminal),
                                    source,
                                });
                            }
                        }
                    }
                }

                match first_failure {
                    Some(failure) => Err(failure),
                    None => Ok(()),
                }
            }
        }
    }
}
