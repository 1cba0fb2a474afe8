//! Error types for tag reader operations.

/// Result type alias for hardware operations.
pub type Result<T> = std::result::Result<T, HardwareError>;

/// Errors that can occur while driving the RFID reader.
///
/// The station treats any of these as fatal when they happen mid-cycle:
/// there is no safe partial state to recover to once the reader itself
/// misbehaves.
#[derive(Debug, thiserror::Error)]
pub enum HardwareError {
    /// Reader is not connected or has been disconnected.
    #[error("Device disconnected: {device}")]
    Disconnected { device: String },

    /// Invalid data read from or destined for a tag.
    #[error("Invalid data: {message}")]
    InvalidData { message: String },

    /// Tag read failed mid-operation.
    #[error("Tag read error: {message}")]
    TagReadError { message: String },

    /// Tag programming failed mid-operation.
    #[error("Tag write error: {message}")]
    TagWriteError { message: String },

    /// Reader initialization failed.
    #[error("Initialization failed: {message}")]
    InitializationFailed { message: String },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HardwareError {
    /// Create a new disconnected error.
    pub fn disconnected(device: impl Into<String>) -> Self {
        Self::Disconnected {
            device: device.into(),
        }
    }

    /// Create a new invalid data error.
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }

    /// Create a new tag read error.
    pub fn tag_read(message: impl Into<String>) -> Self {
        Self::TagReadError {
            message: message.into(),
        }
    }

    /// Create a new tag write error.
    pub fn tag_write(message: impl Into<String>) -> Self {
        Self::TagWriteError {
            message: message.into(),
        }
    }

    /// Create a new initialization failed error.
    pub fn initialization_failed(message: impl Into<String>) -> Self {
        Self::InitializationFailed {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disconnected_error() {
        let error = HardwareError::disconnected("MFRC522");
        assert!(matches!(error, HardwareError::Disconnected { .. }));
        assert_eq!(error.to_string(), "Device disconnected: MFRC522");
    }

    #[test]
    fn test_tag_read_error() {
        let error = HardwareError::tag_read("CRC mismatch");
        assert!(matches!(error, HardwareError::TagReadError { .. }));
        assert_eq!(error.to_string(), "Tag read error: CRC mismatch");
    }

    #[test]
    fn test_invalid_data_error() {
        let error = HardwareError::invalid_data("UID too short");
        assert_eq!(error.to_string(), "Invalid data: UID too short");
    }
}
