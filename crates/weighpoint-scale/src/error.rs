//! Error types for scale operations.

/// Result type alias for scale operations.
pub type Result<T> = std::result::Result<T, ScaleError>;

/// Errors that can occur while polling the scale.
#[derive(Debug, thiserror::Error)]
pub enum ScaleError {
    /// The device produced no data within the bounded read window.
    #[error("Scale read timeout after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// The response line does not match the expected wire format.
    ///
    /// This indicates protocol corruption, not a transient condition;
    /// it is never retried locally.
    #[error("Scale response parse error: {message}")]
    Parse { message: String },

    /// The serial port could not be opened.
    #[error("Failed to open scale port {port}: {message}")]
    Open { port: String, message: String },

    /// The blocking poll task could not complete.
    #[error("Scale poll task failed: {message}")]
    Task { message: String },

    /// Generic I/O error on an open port.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScaleError {
    /// Create a new timeout error.
    pub fn timeout(duration_ms: u64) -> Self {
        Self::Timeout { duration_ms }
    }

    /// Create a new parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a new port-open error.
    pub fn open(port: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Open {
            port: port.into(),
            message: message.into(),
        }
    }

    /// Create a new task error.
    pub fn task(message: impl Into<String>) -> Self {
        Self::Task {
            message: message.into(),
        }
    }
}
