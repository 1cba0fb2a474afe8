//! Serial-port scale implementation.

use crate::{
    Scale,
    codec::{self, POLL_COMMAND, ScaleReading},
    error::{Result, ScaleError},
};
use std::io::{BufRead, BufReader, Write};
use std::time::Duration;
use tracing::{debug, trace, warn};
use weighpoint_core::config::ScaleConfig;

/// Scale attached over a serial (USB) port.
///
/// The port handle is opened inside [`poll`](Scale::poll) and dropped
/// before it returns, on success and on every error path. Holding the
/// handle across cycles is what exhausted device handles on the first
/// firmware generation; scoped acquisition is deliberate here.
///
/// `serialport` I/O is blocking, so each poll runs on the tokio
/// blocking pool.
#[derive(Debug, Clone)]
pub struct SerialScale {
    port_path: String,
    baud_rate: u32,
    read_timeout: Duration,
}

impl SerialScale {
    /// Create a new serial scale from configuration.
    pub fn new(config: &ScaleConfig) -> Self {
        Self {
            port_path: config.usb_port.clone(),
            baud_rate: config.baud_rate,
            read_timeout: config.read_timeout(),
        }
    }

    /// Serial device path this scale polls.
    #[must_use]
    pub fn port_path(&self) -> &str {
        &self.port_path
    }

    /// One blocking poll: open, send the command byte, read one line,
    /// decode. The port is dropped on exit from this function.
    fn poll_blocking(&self) -> Result<ScaleReading> {
        trace!(port = %self.port_path, "opening scale port");
        let mut port = serialport::new(&self.port_path, self.baud_rate)
            .timeout(self.read_timeout)
            .open()
            .map_err(|e| ScaleError::open(&self.port_path, e.to_string()))?;

        port.write_all(&[POLL_COMMAND])?;
        port.flush()?;

        let mut reader = BufReader::new(port);
        let mut raw = Vec::new();
        match reader.read_until(b'\n', &mut raw) {
            Ok(0) => {
                warn!(port = %self.port_path, "scale closed the line without data");
                return Err(ScaleError::timeout(self.read_timeout.as_millis() as u64));
            }
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::TimedOut => {
                // pyserial-style semantics: a timeout still hands over
                // whatever arrived before the deadline.
                if raw.is_empty() {
                    return Err(ScaleError::timeout(self.read_timeout.as_millis() as u64));
                }
            }
            Err(e) => return Err(e.into()),
        }

        let reading = codec::decode_reading(&raw)?;
        debug!(
            port = %self.port_path,
            quantity = reading.quantity,
            "scale reading decoded"
        );
        Ok(reading)
    }
}

impl Scale for SerialScale {
    async fn poll(&mut self) -> Result<ScaleReading> {
        let scale = self.clone();
        tokio::task::spawn_blocking(move || scale.poll_blocking())
            .await
            .map_err(|e| ScaleError::task(e.to_string()))?
    }
}
