//! Station configuration.
//!
//! Loaded once at process start from a TOML file and owned by the
//! orchestrator for the lifetime of the process; nothing re-reads or
//! mutates it afterwards.
//!
//! ```toml
//! [server]
//! endpoint = "https://mts.example.org"
//! api_key = "…"
//!
//! [scale]
//! usb_port = "/dev/ttyUSB0"
//!
//! [station]
//! operator_id = "alex"
//! direction = "check-out"
//! ```

use crate::{
    Result,
    constants::{
        DEFAULT_BAUD_RATE, DEFAULT_CYCLE_DELAY_MS, DEFAULT_HTTP_TIMEOUT_MS,
        DEFAULT_SCALE_READ_TIMEOUT_MS,
    },
    error::Error,
    types::Direction,
};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Inventory server connection settings.
#[derive(Clone, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the inventory server, without a trailing slash.
    pub endpoint: String,

    /// Static API key exchanged for a bearer token each cycle.
    pub api_key: String,
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Keep the key out of logs and crash reports.
        f.debug_struct("ServerConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Serial scale link settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ScaleConfig {
    /// Serial device path, e.g. `/dev/ttyUSB0`.
    pub usb_port: String,

    /// Baud rate for the serial link.
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,

    /// Bounded read timeout for one response line, in ms.
    #[serde(default = "default_scale_read_timeout_ms")]
    pub read_timeout_ms: u64,
}

impl ScaleConfig {
    /// Read timeout as a [`Duration`].
    #[must_use]
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

/// Orchestration settings.
#[derive(Debug, Clone, Deserialize)]
pub struct StationSection {
    /// Operator the transactions are attributed to.
    ///
    /// TODO: replace with badge-based operator acquisition; see
    /// `weighpoint_core::types::OperatorId`.
    pub operator_id: String,

    /// Transaction direction for this station.
    #[serde(default = "default_direction")]
    pub direction: Direction,

    /// Pause between cycles, in ms.
    #[serde(default = "default_cycle_delay_ms")]
    pub cycle_delay_ms: u64,

    /// Timeout per HTTP request, in ms.
    #[serde(default = "default_http_timeout_ms")]
    pub http_timeout_ms: u64,
}

impl StationSection {
    /// Cycle delay as a [`Duration`].
    #[must_use]
    pub fn cycle_delay(&self) -> Duration {
        Duration::from_millis(self.cycle_delay_ms)
    }

    /// HTTP request timeout as a [`Duration`].
    #[must_use]
    pub fn http_timeout(&self) -> Duration {
        Duration::from_millis(self.http_timeout_ms)
    }
}

/// Immutable station configuration, loaded once at process start.
#[derive(Debug, Clone, Deserialize)]
pub struct StationConfig {
    pub server: ServerConfig,
    pub scale: ScaleConfig,
    pub station: StationSection,
}

impl StationConfig {
    /// Load and validate configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, does not parse, or
    /// fails validation (empty endpoint, key, or port).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&raw)
    }

    /// Parse and validate configuration from a TOML string.
    ///
    /// # Errors
    /// Returns an error if the document does not parse or fails
    /// validation.
    pub fn from_toml(raw: &str) -> Result<Self> {
        let mut config: StationConfig = toml::from_str(raw)?;
        config.validate()?;
        // Normalize so path joining never produces `//api/...`.
        while config.server.endpoint.ends_with('/') {
            config.server.endpoint.pop();
        }
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.server.endpoint.trim().is_empty() {
            return Err(Error::MissingConfig("server.endpoint".to_string()));
        }
        if !self.server.endpoint.starts_with("http://")
            && !self.server.endpoint.starts_with("https://")
        {
            return Err(Error::Config(format!(
                "server.endpoint must be an http(s) URL, got {:?}",
                self.server.endpoint
            )));
        }
        if self.server.api_key.trim().is_empty() {
            return Err(Error::MissingConfig("server.api_key".to_string()));
        }
        if self.scale.usb_port.trim().is_empty() {
            return Err(Error::MissingConfig("scale.usb_port".to_string()));
        }
        if self.station.operator_id.trim().is_empty() {
            return Err(Error::MissingConfig("station.operator_id".to_string()));
        }
        Ok(())
    }
}

fn default_baud_rate() -> u32 {
    DEFAULT_BAUD_RATE
}

fn default_scale_read_timeout_ms() -> u64 {
    DEFAULT_SCALE_READ_TIMEOUT_MS
}

fn default_direction() -> Direction {
    Direction::CheckOut
}

fn default_cycle_delay_ms() -> u64 {
    DEFAULT_CYCLE_DELAY_MS
}

fn default_http_timeout_ms() -> u64 {
    DEFAULT_HTTP_TIMEOUT_MS
}
