//! Scale wire-format encoding and decoding.
//!
//! # Wire format
//!
//! The station requests a reading by sending a single command byte:
//!
//! ```text
//! 'S'  (0x53)
//! ```
//!
//! The scale answers with one newline-terminated ASCII line. The weight
//! is the numeric field strictly between the first space character and
//! the first `'k'` (the start of the `"kg"` unit suffix):
//!
//! ```text
//! S    12.34kg\r\n
//!  ^^^^     ^
//!  padding  unit marker
//! ```
//!
//! Prefix and suffix content outside those two markers is ignored, so
//! firmware variations like `"Weight: 0.00kg"` decode the same way.
//!
//! # Examples
//!
//! ```
//! use weighpoint_scale::codec::decode_weight;
//!
//! assert_eq!(decode_weight("S    12.34kg").unwrap(), 12.34);
//! assert_eq!(decode_weight("Weight: 0.00kg").unwrap(), 0.00);
//!
//! // Missing markers are protocol corruption, not zero readings.
//! assert!(decode_weight("ERROR").is_err());
//! assert!(decode_weight("12.5").is_err());
//! ```

use crate::error::{Result, ScaleError};
use weighpoint_core::constants::WEIGHT_UNIT;

/// Poll command byte sent to request a reading.
///
/// Both station firmware generations emit this same octet; one spelled
/// it as a raw byte literal and the other as a UTF-8 encode of `"S"`.
pub const POLL_COMMAND: u8 = b'S';

/// Marker preceding the numeric weight field.
pub const FIELD_MARKER: char = ' ';

/// Marker starting the unit suffix (`"kg"`).
pub const UNIT_MARKER: char = 'k';

/// One decoded scale response.
///
/// Created per poll and discarded once the cycle completes; readings
/// are never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleReading {
    /// Raw response bytes as received from the device.
    pub raw: Vec<u8>,

    /// Decoded weight.
    pub quantity: f64,

    /// Unit of the weight; always [`WEIGHT_UNIT`].
    pub unit: &'static str,
}

/// Decode the weight from one response line.
///
/// The numeric field is the substring strictly between the first
/// [`FIELD_MARKER`] and the first [`UNIT_MARKER`]; surrounding spaces
/// within the field (device padding) are tolerated.
///
/// # Errors
/// Returns [`ScaleError::Parse`] if either marker is absent, if the
/// bounded field is empty, or if it does not parse as a number.
pub fn decode_weight(line: &str) -> Result<f64> {
    let low = line
        .find(FIELD_MARKER)
        .ok_or_else(|| ScaleError::parse(format!("no field marker in {line:?}")))?;
    let high = line
        .find(UNIT_MARKER)
        .ok_or_else(|| ScaleError::parse(format!("no unit marker in {line:?}")))?;

    if high <= low + 1 {
        return Err(ScaleError::parse(format!(
            "empty weight field in {line:?}"
        )));
    }

    let field = line[low + 1..high].trim();
    if field.is_empty() {
        return Err(ScaleError::parse(format!(
            "empty weight field in {line:?}"
        )));
    }

    field
        .parse::<f64>()
        .map_err(|_| ScaleError::parse(format!("non-numeric weight field {field:?} in {line:?}")))
}

/// Decode a full [`ScaleReading`] from raw response bytes.
///
/// # Errors
/// Returns [`ScaleError::Parse`] under the same conditions as
/// [`decode_weight`]. Non-UTF-8 bytes are replaced before decoding;
/// the replacement character cannot form a valid numeric field, so
/// corrupted lines still fail loudly.
pub fn decode_reading(raw: &[u8]) -> Result<ScaleReading> {
    let line = String::from_utf8_lossy(raw);
    let quantity = decode_weight(&line)?;
    Ok(ScaleReading {
        raw: raw.to_vec(),
        quantity,
        unit: WEIGHT_UNIT,
    })
}
