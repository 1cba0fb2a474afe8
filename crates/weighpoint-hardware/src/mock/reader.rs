//! Channel-driven mock tag reader.

use crate::{
    Result,
    traits::{TagData, TagReader},
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::mpsc;

/// Internal event type for the mock reader.
#[derive(Debug, Clone)]
enum TagEvent {
    /// A tag entered the reader field.
    Presented(TagData),
    /// The reader faulted; the next operation fails with this message.
    Fault(String),
}

/// Mock RFID tag reader.
///
/// Created together with a [`MockTagReaderHandle`]; the handle scripts
/// tag presentations and faults, the reader consumes them from the
/// orchestration side.
///
/// # Examples
///
/// ```
/// use weighpoint_hardware::mock::MockTagReader;
/// use weighpoint_hardware::TagReader;
///
/// #[tokio::main]
/// async fn main() -> weighpoint_hardware::Result<()> {
///     let (mut reader, handle) = MockTagReader::new();
///
///     handle.present_tag(vec![0x04, 0xAB, 0xCD, 0xEF], "B100")?;
///
///     let tag = reader.read_tag().await?;
///     assert_eq!(tag.payload, "B100");
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockTagReader {
    event_rx: mpsc::Receiver<TagEvent>,
    release_count: Arc<AtomicUsize>,
}

impl MockTagReader {
    /// Create a new mock reader and its controlling handle.
    pub fn new() -> (Self, MockTagReaderHandle) {
        let (event_tx, event_rx) = mpsc::channel(32);
        let release_count = Arc::new(AtomicUsize::new(0));

        let reader = Self {
            event_rx,
            release_count: Arc::clone(&release_count),
        };
        let handle = MockTagReaderHandle {
            event_tx,
            release_count,
        };

        (reader, handle)
    }

    async fn next_event(&mut self) -> Result<TagData> {
        let event = self
            .event_rx
            .recv()
            .await
            .ok_or_else(|| crate::HardwareError::disconnected("mock tag reader"))?;

        match event {
            TagEvent::Presented(tag) => Ok(tag),
            TagEvent::Fault(message) => Err(crate::HardwareError::tag_read(message)),
        }
    }
}

impl TagReader for MockTagReader {
    async fn read_tag(&mut self) -> Result<TagData> {
        self.next_event().await
    }

    async fn write_tag(&mut self, payload: &str) -> Result<TagData> {
        // A write waits for a physical tag just like a read, then the
        // programmed payload replaces whatever the blank tag carried.
        let mut tag = self.next_event().await?;
        tag.payload = payload.to_string();
        Ok(tag)
    }

    async fn release(&mut self) -> Result<()> {
        self.release_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Handle for scripting a [`MockTagReader`].
#[derive(Debug, Clone)]
pub struct MockTagReaderHandle {
    event_tx: mpsc::Sender<TagEvent>,
    release_count: Arc<AtomicUsize>,
}

impl MockTagReaderHandle {
    /// Present a tag to the reader.
    ///
    /// # Errors
    /// Returns an error if the UID is invalid or the reader side has
    /// been dropped.
    pub fn present_tag(&self, uid: Vec<u8>, payload: impl Into<String>) -> Result<()> {
        let tag = TagData::new(uid, payload)?;
        self.event_tx
            .try_send(TagEvent::Presented(tag))
            .map_err(|_| crate::HardwareError::disconnected("mock tag reader"))
    }

    /// Script a hardware fault; the reader's next operation fails.
    ///
    /// # Errors
    /// Returns an error if the reader side has been dropped.
    pub fn inject_fault(&self, message: impl Into<String>) -> Result<()> {
        self.event_tx
            .try_send(TagEvent::Fault(message.into()))
            .map_err(|_| crate::HardwareError::disconnected("mock tag reader"))
    }

    /// How many times the reader has been released.
    #[must_use]
    pub fn release_count(&self) -> usize {
        self.release_count.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_present_and_read() {
        let (mut reader, handle) = MockTagReader::new();

        handle
            .present_tag(vec![0x04, 0xAB, 0xCD, 0xEF], "B100")
            .unwrap();

        let tag = reader.read_tag().await.unwrap();
        assert_eq!(tag.uid_hex(), "04ABCDEF");
        assert_eq!(tag.payload, "B100");
    }

    #[tokio::test]
    async fn test_read_blocks_until_presented() {
        let (mut reader, handle) = MockTagReader::new();

        let presenter = tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            handle.present_tag(vec![0x01, 0x02, 0x03, 0x04], "B7").unwrap();
        });

        let tag = reader.read_tag().await.unwrap();
        assert_eq!(tag.payload, "B7");
        presenter.await.unwrap();
    }

    #[tokio::test]
    async fn test_write_programs_payload() {
        let (mut reader, handle) = MockTagReader::new();

        // Blank tag enters the field with no payload.
        handle.present_tag(vec![0x01, 0x02, 0x03, 0x04], "").unwrap();

        let tag = reader.write_tag("B200").await.unwrap();
        assert_eq!(tag.payload, "B200");
    }

    #[tokio::test]
    async fn test_injected_fault_surfaces_on_read() {
        let (mut reader, handle) = MockTagReader::new();

        handle.inject_fault("antenna failure").unwrap();

        let result = reader.read_tag().await;
        assert!(matches!(
            result,
            Err(crate::HardwareError::TagReadError { .. })
        ));
    }

    #[tokio::test]
    async fn test_read_fails_when_handle_dropped() {
        let (mut reader, handle) = MockTagReader::new();
        drop(handle);

        let result = reader.read_tag().await;
        assert!(matches!(
            result,
            Err(crate::HardwareError::Disconnected { .. })
        ));
    }

    #[tokio::test]
    async fn test_release_is_counted_and_idempotent() {
        let (mut reader, handle) = MockTagReader::new();

        assert_eq!(handle.release_count(), 0);
        reader.release().await.unwrap();
        assert_eq!(handle.release_count(), 1);

        // A second release must not fault.
        reader.release().await.unwrap();
        assert_eq!(handle.release_count(), 2);
    }

    #[tokio::test]
    async fn test_invalid_uid_rejected_by_handle() {
        let (_reader, handle) = MockTagReader::new();
        assert!(handle.present_tag(vec![0x01], "B1").is_err());
    }
}
