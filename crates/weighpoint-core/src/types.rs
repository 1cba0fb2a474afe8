//! Validated domain types shared across the workspace.

use crate::{
    Result,
    constants::{MAX_ID_LENGTH, MIN_ID_LENGTH},
    error::Error,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inventory batch identifier, as stored on an RFID tag.
///
/// The identifier is normalized (trimmed) before validation so that
/// padding left over from a tag write does not leak into API paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BatchId(String);

impl BatchId {
    /// Create a new batch id with validation.
    ///
    /// # Errors
    /// Returns `Error::InvalidBatchId` if the id is empty, too long, or
    /// contains non-ASCII characters.
    pub fn new(id: &str) -> Result<Self> {
        let id = id.trim();
        let len = id.chars().count();
        if !(MIN_ID_LENGTH..=MAX_ID_LENGTH).contains(&len) {
            return Err(Error::InvalidBatchId(format!(
                "batch id must be {MIN_ID_LENGTH}-{MAX_ID_LENGTH} chars, got {len}"
            )));
        }
        if !id.is_ascii() {
            return Err(Error::InvalidBatchId("batch id must be ASCII".to_string()));
        }
        Ok(BatchId(id.to_string()))
    }

    /// Get the batch id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for BatchId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        BatchId::new(s)
    }
}

/// Identifier of the operator performing the transaction.
///
/// TODO: acquire the operator id from a second badge read instead of
/// station configuration (tracked since the first firmware revision).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperatorId(String);

impl OperatorId {
    /// Create a new operator id with validation.
    ///
    /// # Errors
    /// Returns `Error::InvalidOperatorId` if the id is empty or too long.
    pub fn new(id: &str) -> Result<Self> {
        let id = id.trim();
        let len = id.chars().count();
        if !(MIN_ID_LENGTH..=MAX_ID_LENGTH).contains(&len) {
            return Err(Error::InvalidOperatorId(format!(
                "operator id must be {MIN_ID_LENGTH}-{MAX_ID_LENGTH} chars, got {len}"
            )));
        }
        Ok(OperatorId(id.to_string()))
    }

    /// Get the operator id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OperatorId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Direction of an inventory transaction.
///
/// The check-out stations subtract material from a batch; the check-in
/// variant books it back in. Both run the same cycle, only the flag
/// submitted to the server differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    CheckIn,
    CheckOut,
}

impl Direction {
    /// Whether this direction maps to `isCheckout: true` on the wire.
    #[must_use]
    pub fn is_checkout(&self) -> bool {
        matches!(self, Direction::CheckOut)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Direction::CheckIn => write!(f, "check-in"),
            Direction::CheckOut => write!(f, "check-out"),
        }
    }
}

/// A completed inventory transaction, ready for submission.
///
/// Constructed only after both an identity and a scale reading have been
/// obtained in the same cycle; there is no way to build one from partial
/// data. Carries no idempotency key; resubmission after a network
/// ambiguity is possible and not deduplicated by the station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Operator performing the movement.
    pub operator: OperatorId,

    /// Batch the movement is logged against.
    pub batch: BatchId,

    /// Weighed quantity in kilograms.
    ///
    /// May be slightly negative: a tared scale drifting around zero
    /// reports values like `-0.02`, and those readings are submitted
    /// as-is.
    pub quantity: f64,

    /// Movement direction.
    pub direction: Direction,
}

impl Transaction {
    /// Create a new transaction with validation.
    ///
    /// # Errors
    /// Returns `Error::InvalidQuantity` if the quantity is not a finite
    /// number.
    pub fn new(
        operator: OperatorId,
        batch: BatchId,
        quantity: f64,
        direction: Direction,
    ) -> Result<Self> {
        if !quantity.is_finite() {
            return Err(Error::InvalidQuantity(format!(
                "quantity must be a finite number, got {quantity}"
            )));
        }
        Ok(Transaction {
            operator,
            batch,
            quantity,
            direction,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_id_valid() {
        let id = BatchId::new("B100").unwrap();
        assert_eq!(id.as_str(), "B100");
        assert_eq!(id.to_string(), "B100");
    }

    #[test]
    fn test_batch_id_trimmed() {
        let id = BatchId::new("  B100  ").unwrap();
        assert_eq!(id.as_str(), "B100");
    }

    #[test]
    fn test_batch_id_empty() {
        assert!(BatchId::new("").is_err());
        assert!(BatchId::new("   ").is_err());
    }

    #[test]
    fn test_batch_id_too_long() {
        let long = "X".repeat(MAX_ID_LENGTH + 1);
        assert!(BatchId::new(&long).is_err());
    }

    #[test]
    fn test_batch_id_non_ascii() {
        assert!(BatchId::new("Bäch").is_err());
    }

    #[test]
    fn test_batch_id_from_str() {
        let id: BatchId = "B42".parse().unwrap();
        assert_eq!(id.as_str(), "B42");
    }

    #[test]
    fn test_operator_id_valid() {
        let id = OperatorId::new("alex").unwrap();
        assert_eq!(id.as_str(), "alex");
    }

    #[test]
    fn test_operator_id_empty() {
        assert!(OperatorId::new("").is_err());
    }

    #[test]
    fn test_direction_is_checkout() {
        assert!(Direction::CheckOut.is_checkout());
        assert!(!Direction::CheckIn.is_checkout());
    }

    #[test]
    fn test_direction_serde() {
        let json = serde_json::to_string(&Direction::CheckOut).unwrap();
        assert_eq!(json, "\"check-out\"");
        let back: Direction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Direction::CheckOut);
    }

    #[test]
    fn test_transaction_valid() {
        let txn = Transaction::new(
            OperatorId::new("alex").unwrap(),
            BatchId::new("B100").unwrap(),
            12.5,
            Direction::CheckOut,
        )
        .unwrap();
        assert_eq!(txn.quantity, 12.5);
        assert!(txn.direction.is_checkout());
    }

    #[test]
    fn test_transaction_accepts_tare_drift_quantity() {
        let txn = Transaction::new(
            OperatorId::new("alex").unwrap(),
            BatchId::new("B100").unwrap(),
            -0.02,
            Direction::CheckOut,
        )
        .unwrap();
        assert_eq!(txn.quantity, -0.02);
    }

    #[test]
    fn test_transaction_rejects_non_finite_quantity() {
        for quantity in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result = Transaction::new(
                OperatorId::new("alex").unwrap(),
                BatchId::new("B100").unwrap(),
                quantity,
                Direction::CheckOut,
            );
            assert!(result.is_err());
        }
    }
}
