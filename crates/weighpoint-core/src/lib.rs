//! Core types for the Weighpoint check-in/check-out station.
//!
//! This crate holds the pieces shared by every other crate in the
//! workspace: the error taxonomy, validated domain types (batch and
//! operator identifiers, transactions), protocol and timing constants,
//! and the station configuration loaded once at process start.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;

pub use config::StationConfig;
pub use error::{Error, Result};
pub use types::*;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
