//! In-memory collaborators for tests
//!
//! Unit tests and the e2e suite exercise the daemon without a real `/dev`
//! or login database: a fixed directory, sinks that record what they were
//! asked to write, and a sink that refuses everything.

use std::sync::Mutex;

use async_trait::async_trait;

use msp_types::TerminalSession;

use crate::error::SinkError;
use crate::{ConsoleSink, SessionDirectory, TerminalSink};

/// A directory with a fixed session list.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    sessions: Vec<TerminalSession>,
}

impl StaticDirectory {
    pub fn new(sessions: Vec<TerminalSession>) -> Self {
        Self { sessions }
    }
}

impl SessionDirectory for StaticDirectory {
    fn current_sessions(&self) -> Vec<TerminalSession> {
        self.sessions.clone()
    }
}

/// Records every `(terminal, text)` append.
#[derive(Debug, Default)]
pub struct RecordingSink {
    writes: Mutex<Vec<(Vec<u8>, String)>>,
}

impl RecordingSink {
    pub fn writes(&self) -> Vec<(Vec<u8>, String)> {
        lock(&self.writes).clone()
    }
}

#[async_trait]
impl TerminalSink for RecordingSink {
    async fn append(&self, terminal: &[u8], text: &str) -> Result<(), SinkError> {
        lock(&self.writes).push((terminal.to_vec(), text.to_owned()));
        Ok(())
    }
}

/// Refuses every append, recording the attempt.
#[derive(Debug, Default)]
pub struct FailingSink {
    attempts: Mutex<Vec<Vec<u8>>>,
}

impl FailingSink {
    pub fn attempts(&self) -> Vec<Vec<u8>> {
        lock(&self.attempts).clone()
    }
}

#[async_trait]
impl TerminalSink for FailingSink {
    async fn append(&self, terminal: &[u8], _text: &str) -> Result<(), SinkError> {
        lock(&self.attempts).push(terminal.to_vec());
        Err(SinkError::Io("device unavailable".into()))
    }
}

/// Records console-broadcast appends.
#[derive(Debug, Default)]
pub struct RecordingConsole {
    writes: Mutex<Vec<String>>,
}

impl RecordingConsole {
    pub fn writes(&self) -> Vec<String> {
        lock(&self.writes).clone()
    }
}

#[async_trait]
impl ConsoleSink for RecordingConsole {
    async fn append(&self, text: &str) -> Result<(), SinkError> {
        lock(&self.writes).push(text.to_owned());
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
