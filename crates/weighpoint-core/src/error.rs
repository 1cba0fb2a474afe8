//! Workspace-level error type.
//!
//! Component crates (hardware, scale, client) define their own error
//! enums close to the I/O they wrap; this type covers the concerns that
//! live in `weighpoint-core` itself (configuration loading and domain
//! type validation) plus conversions used at the station boundary.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Validation errors
    #[error("Invalid batch id: {0}")]
    InvalidBatchId(String),

    #[error("Invalid operator id: {0}")]
    InvalidOperatorId(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing configuration key: {0}")]
    MissingConfig(String),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
