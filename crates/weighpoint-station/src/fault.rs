//! Cycle outcomes and the station fault taxonomy.
//!
//! Three classes, decided here and nowhere else:
//!
//! - **Recoverable**: a server rejection ([`Rejection`]); the cycle is
//!   abandoned and reported as [`CycleOutcome::Failed`], the loop
//!   continues.
//! - **Fatal**: everything in [`StationError`]; hardware is released
//!   and the error propagates to the process boundary.
//! - **Controlled shutdown**: an external interrupt; not represented
//!   as an error at all ([`Station::run`](crate::Station::run) returns
//!   `Ok`).

use std::fmt;
use thiserror::Error;
use weighpoint_core::BatchId;

/// Why a cycle was abandoned without a fatal fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The server refused to exchange the API key for a session.
    Authentication,
    /// The server refused the transaction submission.
    Submission,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Rejection::Authentication => write!(f, "authentication rejected"),
            Rejection::Submission => write!(f, "submission rejected"),
        }
    }
}

/// Result of one completed pass of the orchestration loop.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// Transaction submitted and acknowledged.
    Completed { batch: BatchId, quantity: f64 },
    /// Cycle abandoned on a recoverable rejection.
    Failed(Rejection),
}

impl CycleOutcome {
    /// Whether the cycle ended with an acknowledged submission.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, CycleOutcome::Completed { .. })
    }
}

/// Fatal station faults.
///
/// Everything here terminates the station: scale protocol corruption
/// means the physical link cannot be trusted, and the remaining
/// variants are faults the loop has no classification for.
#[derive(Debug, Error)]
pub enum StationError {
    /// Scale poll failed (timeout or protocol corruption).
    #[error("Scale fault: {0}")]
    Scale(#[from] weighpoint_scale::ScaleError),

    /// Tag reader failed mid-cycle.
    #[error("Hardware fault: {0}")]
    Hardware(#[from] weighpoint_hardware::HardwareError),

    /// Transport-level fault talking to the inventory server.
    #[error("Inventory API fault: {0}")]
    Client(#[from] weighpoint_client::ClientError),

    /// Domain validation fault (bad tag payload, bad configuration).
    #[error("Domain fault: {0}")]
    Domain(#[from] weighpoint_core::Error),

    /// The loop attempted an illegal state transition.
    #[error("Invalid state transition from {from} to {to}")]
    InvalidStateTransition { from: String, to: String },
}
