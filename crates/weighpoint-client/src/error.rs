//! Error types for inventory server communication.

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while talking to the inventory server.
///
/// Server rejections are not errors; they are `Ok(None)` results (see
/// the crate docs). These variants cover transport and protocol faults
/// that the station cannot classify, which it treats as fatal.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP transport error (connect failure, request timeout, TLS).
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// A 200 response whose body does not match the documented shape.
    #[error("Malformed server response: {message}")]
    MalformedResponse { message: String },
}

impl ClientError {
    /// Create a new malformed-response error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }
}
