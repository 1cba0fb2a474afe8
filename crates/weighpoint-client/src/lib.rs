//! HTTP client for the inventory server.
//!
//! Two operations, both single-attempt: [`InventoryClient::authenticate`]
//! exchanges the station's API key for a short-lived bearer token, and
//! [`InventoryClient::submit_transaction`] logs a completed transaction
//! against a batch. Server rejections (any non-200 status) come back as
//! `Ok(None)` so the orchestration loop can classify them as
//! recoverable; only transport faults surface as errors.
//!
//! Retry cadence lives in the orchestration loop, never here.

pub mod client;
pub mod error;
pub mod types;

pub use client::{InventoryClient, InventoryClientConfig};
pub use error::{ClientError, Result};
pub use types::AuthSession;
