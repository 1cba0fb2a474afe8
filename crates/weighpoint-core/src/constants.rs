//! Shared constants for the Weighpoint station.
//!
//! Timing defaults follow the original station firmware: a 1-second
//! bounded read on the scale and a 1-second pause between cycles. Both
//! are defaults only; the effective values come from
//! [`StationConfig`](crate::config::StationConfig).

// ============================================================================
// Identifier limits
// ============================================================================

/// Minimum length of a batch or operator identifier, in characters.
pub const MIN_ID_LENGTH: usize = 1;

/// Maximum length of a batch or operator identifier, in characters.
///
/// Matches the usable payload of the NTAG/Mifare tags the stations are
/// provisioned with; longer identifiers would not survive a tag write.
pub const MAX_ID_LENGTH: usize = 48;

// ============================================================================
// Scale protocol
// ============================================================================

/// Unit suffix reported by the scale. The device always weighs in
/// kilograms; the suffix is part of the wire format, not a preference.
pub const WEIGHT_UNIT: &str = "kg";

/// Default serial baud rate for the scale link.
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Default bounded read timeout for one scale response line, in ms.
pub const DEFAULT_SCALE_READ_TIMEOUT_MS: u64 = 1000;

// ============================================================================
// Orchestration timing
// ============================================================================

/// Default pause between cycles, in ms.
pub const DEFAULT_CYCLE_DELAY_MS: u64 = 1000;

/// Default timeout for each HTTP request to the inventory server, in ms.
///
/// The original firmware issued unbounded requests; a silent network
/// fault would stall the station forever. Every request here carries an
/// explicit bound.
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 10_000;
