//! Device-backed sinks
//!
//! Terminals are files under a device root (`/dev` in production, a tempdir
//! in tests) and delivery is an `O_APPEND` write. The terminal name comes
//! off the wire, so it is validated before it ever touches a path: it must
//! stay inside the device root. `pts/3`-style names are legitimate and
//! allowed; absolute names and `..` traversal are not.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::trace;

use crate::error::SinkError;
use crate::{ConsoleSink, TerminalSink};

/// Appends notes to `<dev_root>/<terminal>`.
#[derive(Debug, Clone)]
pub struct DevTerminalSink {
    dev_root: PathBuf,
}

impl DevTerminalSink {
    pub fn new(dev_root: impl Into<PathBuf>) -> Self {
        Self {
            dev_root: dev_root.into(),
        }
    }

    /// Resolve a wire terminal name to a device path, refusing anything that
    /// could escape the device root.
    fn device_path(&self, terminal: &[u8]) -> Result<PathBuf, SinkError> {
        let name = std::str::from_utf8(terminal).map_err(|_| SinkError::InvalidTerminalName {
            name: msp_types::text::lossy(terminal),
        })?;

        let refused = name.is_empty()
            || name.starts_with('/')
            || name.contains('\\')
            || name.split('/').any(|segment| segment.is_empty() || segment == "." || segment == "..");
        if refused {
            return Err(SinkError::InvalidTerminalName { name: name.into() });
        }

        Ok(self.dev_root.join(name))
    }
}

#[async_trait]
impl TerminalSink for DevTerminalSink {
    async fn append(&self, terminal: &[u8], text: &str) -> Result<(), SinkError> {
        let path = self.device_path(terminal)?;
        append_to_device(&path, text).await
    }
}

/// Appends console-broadcast notes to a fixed console device.
#[derive(Debug, Clone)]
pub struct DevConsoleSink {
    device: PathBuf,
}

impl DevConsoleSink {
    pub fn new(device: impl Into<PathBuf>) -> Self {
        Self {
            device: device.into(),
        }
    }
}

#[async_trait]
impl ConsoleSink for DevConsoleSink {
    async fn append(&self, text: &str) -> Result<(), SinkError> {
        append_to_device(&self.device, text).await
    }
}

async fn append_to_device(path: &Path, text: &str) -> Result<(), SinkError> {
    trace!(device = %path.display(), bytes = text.len(), "appending");
    let mut device = OpenOptions::new().append(true).open(path).await?;
    device.write_all(text.as_bytes()).await?;
    device.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn appends_to_the_named_device() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("tty1"), "").unwrap();

        let sink = DevTerminalSink::new(root.path());
        sink.append(b"tty1", "first\n").await.unwrap();
        sink.append(b"tty1", "second\n").await.unwrap();

        let contents = std::fs::read_to_string(root.path().join("tty1")).unwrap();
        assert_eq!(contents, "first\nsecond\n");
    }

    #[tokio::test]
    async fn pseudo_terminal_names_are_allowed() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("pts")).unwrap();
        std::fs::write(root.path().join("pts/3"), "").unwrap();

        let sink = DevTerminalSink::new(root.path());
        sink.append(b"pts/3", "hi\n").await.unwrap();

        let contents = std::fs::read_to_string(root.path().join("pts/3")).unwrap();
        assert_eq!(contents, "hi\n");
    }

    #[tokio::test]
    async fn traversal_is_refused_before_any_open() {
        let root = tempfile::tempdir().unwrap();
        let sink = DevTerminalSink::new(root.path());

        for name in [&b"../etc/passwd"[..], b"/etc/passwd", b"", b"a/../b"] {
            let err = sink.append(name, "x").await.unwrap_err();
            assert!(matches!(err, SinkError::InvalidTerminalName { .. }), "{name:?}");
        }
    }

    #[tokio::test]
    async fn missing_device_is_an_io_failure() {
        let root = tempfile::tempdir().unwrap();
        let sink = DevTerminalSink::new(root.path());

        let err = sink.append(b"tty9", "x").await.unwrap_err();
        assert!(matches!(err, SinkError::Io(_)));
    }

    #[tokio::test]
    async fn console_sink_appends_to_its_device() {
        let root = tempfile::tempdir().unwrap();
        let console_path = root.path().join("console");
        std::fs::write(&console_path, "").unwrap();

        let console = DevConsoleSink::new(&console_path);
        console.append("broadcast\n").await.unwrap();

        assert_eq!(std::fs::read_to_string(&console_path).unwrap(), "broadcast\n");
    }
}
