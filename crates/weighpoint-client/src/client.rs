//! Inventory server HTTP client.

use crate::{
    error::{ClientError, Result},
    types::{AuthRequest, AuthResponse, AuthSession, TransactionLogRequest},
};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, info, warn};
use weighpoint_core::{StationConfig, Transaction, constants::DEFAULT_HTTP_TIMEOUT_MS};

/// Configuration for the inventory client.
#[derive(Debug, Clone)]
pub struct InventoryClientConfig {
    /// Base URL of the inventory server, without a trailing slash.
    pub endpoint: String,

    /// Static API key exchanged for a bearer token.
    pub api_key: String,

    /// Timeout applied to every request.
    pub timeout: Duration,
}

impl InventoryClientConfig {
    /// Build client configuration from the station configuration.
    #[must_use]
    pub fn from_station(config: &StationConfig) -> Self {
        Self {
            endpoint: config.server.endpoint.clone(),
            api_key: config.server.api_key.clone(),
            timeout: config.station.http_timeout(),
        }
    }
}

impl Default for InventoryClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:5000".to_string(),
            api_key: String::new(),
            timeout: Duration::from_millis(DEFAULT_HTTP_TIMEOUT_MS),
        }
    }
}

/// Client for the inventory server's station-facing API.
///
/// Both operations make exactly one attempt. A non-200 status is a
/// server rejection and comes back as `Ok(None)`; transport faults
/// (connect failure, timeout) are `Err` and left for the orchestration
/// loop to classify.
///
/// # Example
///
/// ```no_run
/// use weighpoint_client::{InventoryClient, InventoryClientConfig};
///
/// # async fn example() -> weighpoint_client::Result<()> {
/// let client = InventoryClient::new(InventoryClientConfig {
///     endpoint: "https://mts.example.org".to_string(),
///     api_key: "station-key".to_string(),
///     timeout: std::time::Duration::from_secs(10),
/// })?;
///
/// match client.authenticate().await? {
///     Some(session) => println!("authenticated"),
///     None => println!("rejected; retry next cycle"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct InventoryClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl InventoryClient {
    /// Create a new client with an explicit per-request timeout.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: InventoryClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        debug!(endpoint = %config.endpoint, "inventory client created");

        Ok(Self {
            http,
            endpoint: config.endpoint,
            api_key: config.api_key,
        })
    }

    /// Exchange the API key for a bearer session.
    ///
    /// `POST {endpoint}/api/auth?method=ApiKey` with `{"apiKey": …}`.
    /// Returns `Ok(Some(session))` on 200, `Ok(None)` on any other
    /// status.
    ///
    /// # Errors
    /// Returns an error only for transport faults or a 200 body without
    /// a `token` field.
    pub async fn authenticate(&self) -> Result<Option<AuthSession>> {
        let url = format!("{}/api/auth?method=ApiKey", self.endpoint);

        let response = self
            .http
            .post(&url)
            .json(&AuthRequest {
                api_key: &self.api_key,
            })
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(%status, "authentication rejected by server");
            return Ok(None);
        }

        let body: AuthResponse = response
            .json()
            .await
            .map_err(|e| ClientError::malformed(format!("auth response: {e}")))?;

        debug!("authentication succeeded");
        Ok(Some(AuthSession::new(body.token)))
    }

    /// Log a completed transaction against its batch.
    ///
    /// `POST {endpoint}/api/inventory/{batchId}/log`, bearer-authed.
    /// Returns `Ok(Some(body))` on 200, `Ok(None)` on any other status.
    /// Delivery is not exactly-once: a transport fault after the server
    /// accepted is indistinguishable from total failure, and nothing is
    /// retried or deduplicated here.
    ///
    /// # Errors
    /// Returns an error only for transport faults or an unparseable 200
    /// body.
    pub async fn submit_transaction(
        &self,
        session: &AuthSession,
        transaction: &Transaction,
    ) -> Result<Option<serde_json::Value>> {
        let url = format!(
            "{}/api/inventory/{}/log",
            self.endpoint, transaction.batch
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(session.token())
            .json(&TransactionLogRequest::from(transaction))
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(
                %status,
                batch = %transaction.batch,
                "transaction rejected by server"
            );
            return Ok(None);
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ClientError::malformed(format!("transaction response: {e}")))?;

        info!(
            batch = %transaction.batch,
            quantity = transaction.quantity,
            direction = %transaction.direction,
            "transaction logged"
        );
        Ok(Some(body))
    }
}
