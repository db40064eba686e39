//! Logged-in session snapshot entries

/// One logged-in user/terminal pair as reported by a session directory.
///
/// Entries are owned by the directory snapshot they came from; the core never
/// caches them across message cycles, since the set of logged-in users can
/// change between messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalSession {
    /// Login name, truncated at the first NUL by the directory.
    pub user: Vec<u8>,
    /// Terminal device name relative to the device root (e.g. `tty1`).
    pub terminal: Vec<u8>,
}

impl TerminalSession {
    pub fn new(user: impl Into<Vec<u8>>, terminal: impl Into<Vec<u8>>) -> Self {
        Self {
            user: user.into(),
            terminal: terminal.into(),
        }
    }
}
