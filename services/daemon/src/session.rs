//! Per-connection protocol state machine
//!
//! One session owns one socket and runs as its own task, cycling through
//! awaiting-message → validating → resolving → replying until the idle
//! deadline reaps it or the transport dies. The connection is reused across
//! cycles — this is not a one-shot request/response protocol.
//!
//! ## Idle deadline
//!
//! The deadline is armed when the session starts and re-armed only after a
//! reply write completes; partial reads do not extend it. When the timer
//! branch wins the select, the deadline is re-checked against the clock
//! before the socket is shut down, so a deadline re-armed concurrently with
//! an in-flight wait can never close a live session. Dropping the session
//! drops any outstanding sleep with it — a timer cannot fire against a
//! session that no longer exists.
//!
//! ## Failure scope
//!
//! Codec and delivery failures are local to one cycle: they produce a
//! failure acknowledgement and the connection stays open for the next
//! attempt. Transport failures end the session and nothing else — one
//! broken connection never affects another.

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info};

use msp_codec::CodecError;
use msp_delivery::{DeliveryError, Dispatcher};
use msp_types::protocol_constants::{ACK_FAILURE, ACK_SUCCESS, FIELD_DELIMITER, MIN_FRAME_SIZE};

use crate::config::SessionSettings;

/// Everything that turns a received frame into a failure acknowledgement.
/// `Display` passes straight through to the wire.
#[derive(Debug, Error)]
enum CycleError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

/// How one wait for a frame ended.
enum FrameOutcome {
    /// At least [`MIN_FRAME_SIZE`] bytes arrived; here is the buffer.
    Frame(Vec<u8>),
    /// The idle deadline elapsed.
    IdleExpired,
    /// The transport failed; nothing more can be read or written.
    Disconnected,
}

/// State for one accepted connection.
pub struct ConnectionSession {
    stream: TcpStream,
    peer: SocketAddr,
    dispatcher: Dispatcher,
    idle_timeout: Duration,
    max_frame: usize,
    deadline: Instant,
}

impl ConnectionSession {
    /// Take ownership of an accepted socket and arm the idle deadline.
    pub fn new(
        stream: TcpStream,
        peer: SocketAddr,
        dispatcher: Dispatcher,
        settings: &SessionSettings,
    ) -> Self {
        let idle_timeout = settings.idle_timeout();
        Self {
            stream,
            peer,
            dispatcher,
            idle_timeout,
            // The frame buffer must at least hold the read floor, or the
            // read slice could come up empty and masquerade as EOF.
            max_frame: settings.max_frame_bytes.max(MIN_FRAME_SIZE),
            deadline: Instant::now() + idle_timeout,
        }
    }

    /// Drive the session to completion. Consumes the session; when this
    /// returns, the socket and any pending timer wait are gone.
    pub async fn run(mut self) {
        debug!(peer = %self.peer, "session started");

        loop {
            match self.await_frame().await {
                FrameOutcome::Frame(frame) => {
                    let reply = self.process(&frame).await;
                    if let Err(error) = self.stream.write_all(&reply).await {
                        debug!(peer = %self.peer, %error, "reply write failed");
                        break;
                    }
                    // The cycle is complete; the peer has earned a fresh
                    // idle allowance.
                    self.deadline = Instant::now() + self.idle_timeout;
                }
                FrameOutcome::IdleExpired => {
                    info!(peer = %self.peer, "closing idle connection");
                    let _ = self.stream.shutdown().await;
                    break;
                }
                FrameOutcome::Disconnected => break,
            }
        }

        debug!(peer = %self.peer, "session ended");
    }

    /// Accumulate reads into a fresh buffer until at least the minimum
    /// frame size has arrived, the idle deadline passes, or the transport
    /// fails. Mirrors a transfer-at-least read: the frame is whatever has
    /// arrived once the floor is crossed.
    async fn await_frame(&mut self) -> FrameOutcome {
        let mut buffer = vec![0u8; self.max_frame];
        let mut filled = 0;

        loop {
            if filled >= MIN_FRAME_SIZE {
                buffer.truncate(filled);
                return FrameOutcome::Frame(buffer);
            }

            tokio::select! {
                read = self.stream.read(&mut buffer[filled..]) => match read {
                    Ok(0) => {
                        // Clean end of stream while idle. Not an immediate
                        // teardown; any runt bytes are discarded and the
                        // idle deadline decides when the session dies. A
                        // read that returned 0 returns 0 forever, so wait
                        // on the deadline instead of re-polling the socket.
                        debug!(peer = %self.peer, "peer closed its write side");
                        return self.wait_out_idle_deadline().await;
                    }
                    Ok(bytes) => filled += bytes,
                    Err(error) => {
                        debug!(peer = %self.peer, %error, "read failed");
                        return FrameOutcome::Disconnected;
                    }
                },
                () = sleep_until(self.deadline) => {
                    if Instant::now() >= self.deadline {
                        return FrameOutcome::IdleExpired;
                    }
                    // Woke against a stale deadline; keep waiting.
                }
            }
        }
    }

    /// Park until the idle deadline genuinely elapses.
    async fn wait_out_idle_deadline(&self) -> FrameOutcome {
        loop {
            sleep_until(self.deadline).await;
            if Instant::now() >= self.deadline {
                return FrameOutcome::IdleExpired;
            }
        }
    }

    /// Validate and deliver one frame, producing the acknowledgement bytes:
    /// the success marker alone, or the failure marker followed by the
    /// NUL-terminated failure text.
    async fn process(&self, frame: &[u8]) -> Vec<u8> {
        match self.handle(frame).await {
            Ok(()) => vec![ACK_SUCCESS],
            Err(failure) => {
                let text = failure.to_string();
                debug!(peer = %self.peer, %text, "cycle failed");

                let mut reply = Vec::with_capacity(text.len() + 2);
                reply.push(ACK_FAILURE);
                reply.extend_from_slice(text.as_bytes());
                reply.push(FIELD_DELIMITER);
                reply
            }
        }
    }

    async fn handle(&self, frame: &[u8]) -> Result<(), CycleError> {
        let message = msp_codec::parse(frame)?;
        debug!(
            peer = %self.peer,
            sender = %message.sender_display(),
            recipient = %message.recipient_display(),
            "message accepted"
        );
        self.dispatcher.deliver(&message).await?;
        Ok(())
    }
}
