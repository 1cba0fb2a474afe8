//! Scripted mock scale for tests and development.

use crate::{
    Scale,
    codec::{self, ScaleReading},
    error::{Result, ScaleError},
};
use std::collections::VecDeque;
use weighpoint_core::constants::DEFAULT_SCALE_READ_TIMEOUT_MS;

#[derive(Debug)]
enum ScriptedPoll {
    /// Raw response line, decoded at poll time like the real device's.
    Line(Vec<u8>),
    /// Silent device: the poll times out.
    Timeout,
}

/// Mock scale that replays a scripted sequence of responses.
///
/// Each poll consumes the next scripted entry; lines are decoded
/// through the real codec, so a scripted garbage line fails exactly the
/// way a corrupted device response would. An exhausted script behaves
/// like a silent device.
///
/// # Examples
///
/// ```
/// use weighpoint_scale::{MockScale, Scale};
///
/// # #[tokio::main]
/// # async fn main() {
/// let mut scale = MockScale::new();
/// scale.enqueue_line("S 12.50kg\r\n");
///
/// let reading = scale.poll().await.unwrap();
/// assert_eq!(reading.quantity, 12.50);
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MockScale {
    script: VecDeque<ScriptedPoll>,
}

impl MockScale {
    /// Create a new mock scale with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script one response line for a future poll.
    pub fn enqueue_line(&mut self, line: &str) {
        self.script
            .push_back(ScriptedPoll::Line(line.as_bytes().to_vec()));
    }

    /// Script one silent (timed-out) poll.
    pub fn enqueue_timeout(&mut self) {
        self.script.push_back(ScriptedPoll::Timeout);
    }

    /// Number of scripted polls not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Scale for MockScale {
    async fn poll(&mut self) -> Result<ScaleReading> {
        match self.script.pop_front() {
            Some(ScriptedPoll::Line(raw)) => codec::decode_reading(&raw),
            Some(ScriptedPoll::Timeout) | None => {
                Err(ScaleError::timeout(DEFAULT_SCALE_READ_TIMEOUT_MS))
            }
        }
    }
}
