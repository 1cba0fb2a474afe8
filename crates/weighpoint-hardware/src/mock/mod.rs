//! Mock tag reader for testing and development.
//!
//! The mock is driven programmatically through a handle, so tests (and
//! the keyboard-driven development binary) can script tag presentations
//! without physical hardware.

mod reader;

pub use reader::{MockTagReader, MockTagReaderHandle};
