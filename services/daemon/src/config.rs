//! Daemon configuration
//!
//! TOML file with one section per concern; every field has a default, so an
//! empty file (or no file at all) yields a daemon on the registered port
//! with the conventional 60-second idle timeout. The listen port is plain
//! configuration handed to the listener constructor — there is no
//! process-wide mutable port anywhere.
//!
//! ```toml
//! [listen]
//! address = "0.0.0.0"
//! port = 18
//!
//! [session]
//! idle_timeout_ms = 60000
//! max_frame_bytes = 511
//!
//! [delivery]
//! columns = 60
//! dev_root = "/dev"
//! console_device = "/dev/console"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use msp_types::protocol_constants::{
    DEFAULT_NOTE_COLUMNS, IDLE_TIMEOUT_MS, MAX_FRAME_SIZE, MSP_PORT,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DaemonConfig {
    pub listen: ListenSettings,
    pub session: SessionSettings,
    pub delivery: DeliverySettings,
}

impl DaemonConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}

/// Where the daemon listens.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListenSettings {
    pub address: String,
    pub port: u16,
}

impl ListenSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}

impl Default for ListenSettings {
    fn default() -> Self {
        Self {
            address: "0.0.0.0".to_string(),
            port: MSP_PORT,
        }
    }
}

/// Per-connection behavior.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionSettings {
    /// How long a connection may sit without completing a cycle.
    pub idle_timeout_ms: u64,
    /// Upper bound on one request frame.
    pub max_frame_bytes: usize,
}

impl SessionSettings {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            idle_timeout_ms: IDLE_TIMEOUT_MS,
            max_frame_bytes: MAX_FRAME_SIZE,
        }
    }
}

/// How and where notes are written.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeliverySettings {
    /// Column width notes are wrapped to.
    pub columns: usize,
    /// Root directory terminal names resolve under.
    pub dev_root: PathBuf,
    /// Device receiving console broadcasts.
    pub console_device: PathBuf,
}

impl Default for DeliverySettings {
    fn default() -> Self {
        Self {
            columns: DEFAULT_NOTE_COLUMNS,
            dev_root: PathBuf::from("/dev"),
            console_device: PathBuf::from("/dev/console"),
        }
    }
}
