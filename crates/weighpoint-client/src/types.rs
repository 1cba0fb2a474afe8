//! Wire types for the inventory server API.

use serde::{Deserialize, Serialize};
use std::fmt;
use weighpoint_core::Transaction;

/// Short-lived bearer credential obtained from the auth endpoint.
///
/// Created fresh every cycle; the station does no expiry tracking and
/// no caching; re-authenticating is always safe.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthSession {
    token: String,
}

impl AuthSession {
    /// Wrap a token received from the server.
    #[must_use]
    pub fn new(token: String) -> Self {
        Self { token }
    }

    /// The raw bearer token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Tokens are credentials; keep them out of logs.
        f.debug_struct("AuthSession")
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Body of `POST /api/auth?method=ApiKey`.
#[derive(Debug, Serialize)]
pub(crate) struct AuthRequest<'a> {
    #[serde(rename = "apiKey")]
    pub api_key: &'a str,
}

/// Body of a 200 auth response.
#[derive(Debug, Deserialize)]
pub(crate) struct AuthResponse {
    pub token: String,
}

/// Body of `POST /api/inventory/{batchId}/log`.
#[derive(Debug, Serialize)]
pub(crate) struct TransactionLogRequest {
    #[serde(rename = "isCheckout")]
    pub is_checkout: bool,
    pub quantity: f64,
    #[serde(rename = "userId")]
    pub user_id: String,
}

impl From<&Transaction> for TransactionLogRequest {
    fn from(txn: &Transaction) -> Self {
        Self {
            is_checkout: txn.direction.is_checkout(),
            quantity: txn.quantity,
            user_id: txn.operator.as_str().to_string(),
        }
    }
}
