//! Hardware abstraction for the Weighpoint RFID tag reader.
//!
//! The station never talks to a reader driver directly; it goes through
//! the [`TagReader`] capability trait defined here. That keeps the
//! MFRC522/GPIO driver an external collaborator behind a seam, and lets
//! every orchestration path run against the channel-driven
//! [`MockTagReader`](mock::MockTagReader) without physical hardware.
//!
//! All trait methods are native `async fn` (edition 2024 RPITIT); use
//! generic type parameters rather than trait objects:
//!
//! ```no_run
//! use weighpoint_hardware::{Result, TagData, TagReader};
//!
//! async fn wait_for_batch_card<R: TagReader>(reader: &mut R) -> Result<TagData> {
//!     reader.read_tag().await
//! }
//! ```

#![allow(async_fn_in_trait)]

pub mod error;
pub mod mock;
pub mod traits;

pub use error::{HardwareError, Result};
pub use traits::{MAX_UID_LENGTH, MIN_UID_LENGTH, TagData, TagReader};
