//! Tag reader trait and tag data types.

#![allow(async_fn_in_trait)]

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Minimum UID length in bytes (per ISO 14443).
pub const MIN_UID_LENGTH: usize = 4;

/// Maximum UID length in bytes (per ISO 14443).
pub const MAX_UID_LENGTH: usize = 10;

/// Data read from (or just written to) an RFID tag.
///
/// The payload is the identifier string the provisioning utility stored
/// on the tag; for Weighpoint stations, an inventory batch id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagData {
    /// Tag unique identifier (4-10 bytes).
    pub uid: Vec<u8>,

    /// Text payload stored on the tag.
    pub payload: String,

    /// When the tag was read.
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl TagData {
    /// Create new tag data with the current timestamp.
    ///
    /// # Errors
    /// Returns an error if the UID length is outside the 4-10 byte range
    /// allowed by ISO 14443.
    pub fn new(uid: Vec<u8>, payload: impl Into<String>) -> Result<Self> {
        let len = uid.len();
        if !(MIN_UID_LENGTH..=MAX_UID_LENGTH).contains(&len) {
            return Err(crate::HardwareError::invalid_data(format!(
                "tag UID must be {MIN_UID_LENGTH}-{MAX_UID_LENGTH} bytes, got {len}"
            )));
        }
        Ok(Self {
            uid,
            payload: payload.into(),
            timestamp: chrono::Utc::now(),
        })
    }

    /// Get the UID as a hexadecimal string.
    #[must_use]
    pub fn uid_hex(&self) -> String {
        self.uid.iter().map(|b| format!("{:02X}", b)).collect()
    }
}

/// RFID tag reader abstraction.
///
/// The orchestration loop only ever calls [`read_tag`](Self::read_tag);
/// [`write_tag`](Self::write_tag) exists for the one-shot provisioning
/// utility. [`release`](Self::release) returns the hardware to a safe
/// state (the GPIO-cleanup counterpart on real readers) and must be
/// idempotent; the station guarantees it runs exactly once per process
/// on every exit path, but a second call must not fault.
pub trait TagReader: Send {
    /// Block until a tag is presented and read its payload.
    ///
    /// # Errors
    /// Returns an error if the reader disconnects or the read fails
    /// mid-operation. Such failures are fatal to the calling cycle.
    async fn read_tag(&mut self) -> Result<TagData>;

    /// Block until a tag is presented, then program `payload` onto it.
    ///
    /// Provisioning path only; the orchestration loop never calls this.
    ///
    /// # Errors
    /// Returns an error if the reader disconnects or programming fails.
    async fn write_tag(&mut self, payload: &str) -> Result<TagData>;

    /// Release the reader hardware.
    ///
    /// # Errors
    /// Returns an error if the driver cannot reach the device to shut
    /// it down; callers release at most best-effort on error paths.
    async fn release(&mut self) -> Result<()>;
}
