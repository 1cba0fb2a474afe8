//! Serial scale protocol for the Weighpoint station.
//!
//! The scale speaks a one-byte command protocol: the station sends `'S'`
//! and the device answers with a single ASCII line carrying the weight,
//! e.g. `"S    12.34kg\r\n"`. This crate owns that protocol end to end:
//!
//! - [`codec`]: poll-command constant and response decoding.
//! - [`SerialScale`]: the `serialport`-backed implementation. The
//!   serial handle is opened per poll and closed on every exit path,
//!   so thousands of cycles cannot exhaust device handles.
//! - [`MockScale`]: a scripted implementation for tests and
//!   development.
//!
//! Decoding failures are deliberately loud: a malformed line means the
//! physical protocol cannot be trusted, so [`ScaleError::Parse`]
//! propagates to the orchestrator instead of being retried with stale
//! data.

#![allow(async_fn_in_trait)]

pub mod codec;
pub mod error;
pub mod mock;
pub mod serial;

pub use codec::{POLL_COMMAND, ScaleReading, decode_reading, decode_weight};
pub use error::{Result, ScaleError};
pub use mock::MockScale;
pub use serial::SerialScale;

/// Weighing scale abstraction.
///
/// One poll sends the command byte and yields one decoded reading. No
/// retry happens inside an implementation; retry cadence belongs to
/// the orchestration loop.
pub trait Scale: Send {
    /// Poll the scale once for a reading.
    ///
    /// # Errors
    /// Returns [`ScaleError::Timeout`] if the device stays silent for
    /// the bounded read window, [`ScaleError::Parse`] if the response
    /// line is malformed, or an I/O variant if the port itself fails.
    async fn poll(&mut self) -> Result<ScaleReading>;
}
