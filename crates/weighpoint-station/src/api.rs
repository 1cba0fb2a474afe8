//! Inventory API capability trait.
//!
//! The orchestration loop talks to the inventory server through this
//! seam rather than holding a concrete HTTP client, so the end-to-end
//! cycle tests can script server behaviour without opening sockets.

use serde_json::Value;
use weighpoint_client::{AuthSession, InventoryClient, Result};
use weighpoint_core::Transaction;

/// Remote inventory service as seen by the orchestration loop.
///
/// Both methods follow the rejection-versus-fault contract of
/// [`InventoryClient`]: `Ok(None)` is a server rejection the loop can
/// recover from, `Err` is a transport fault it cannot classify.
pub trait InventoryApi: Send {
    /// Exchange the configured API key for a session token.
    async fn authenticate(&self) -> Result<Option<AuthSession>>;

    /// Submit a transaction under a session token.
    async fn submit_transaction(
        &self,
        session: &AuthSession,
        transaction: &Transaction,
    ) -> Result<Option<Value>>;
}

impl InventoryApi for InventoryClient {
    async fn authenticate(&self) -> Result<Option<AuthSession>> {
        InventoryClient::authenticate(self).await
    }

    async fn submit_transaction(
        &self,
        session: &AuthSession,
        transaction: &Transaction,
    ) -> Result<Option<Value>> {
        InventoryClient::submit_transaction(self, session, transaction).await
    }
}
