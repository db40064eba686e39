//! utmpx-backed session directory
//!
//! Enumerates the live login database the way the platform intends:
//! `setutxent`/`getutxent`/`endutxent`, keeping `USER_PROCESS` records.
//! The iterator is process-global and not reentrant, so every snapshot runs
//! under one lock; snapshots are small and taken once per message cycle.

use std::os::raw::c_char;
use std::sync::Mutex;

use libc::{endutxent, getutxent, setutxent, USER_PROCESS};

use msp_types::TerminalSession;

use crate::SessionDirectory;

static UTMP_LOCK: Mutex<()> = Mutex::new(());

/// Live snapshot source over the system's utmpx database.
#[derive(Debug, Clone, Copy, Default)]
pub struct UtmpSessionDirectory;

impl UtmpSessionDirectory {
    pub fn new() -> Self {
        Self
    }
}

impl SessionDirectory for UtmpSessionDirectory {
    fn current_sessions(&self) -> Vec<TerminalSession> {
        let _guard = UTMP_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut sessions = Vec::new();

        // Safety: access to the global utmpx iterator is serialized by
        // UTMP_LOCK, and each returned record is copied out before the next
        // getutxent call can overwrite it.
        unsafe {
            setutxent();
            loop {
                let record = getutxent();
                if record.is_null() {
                    break;
                }
                let record = &*record;
                if record.ut_type != USER_PROCESS {
                    continue;
                }
                sessions.push(TerminalSession {
                    user: truncate_at_nul(&record.ut_user),
                    terminal: truncate_at_nul(&record.ut_line),
                });
            }
            endutxent();
        }

        sessions
    }
}

/// utmpx fields are fixed-width and NUL-padded; only the leading run of
/// non-NUL bytes is the name.
fn truncate_at_nul(field: &[c_char]) -> Vec<u8> {
    field
        .iter()
        .take_while(|byte| **byte != 0)
        .map(|byte| *byte as u8)
        .collect()
}
