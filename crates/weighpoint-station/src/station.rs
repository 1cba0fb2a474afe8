//! The orchestration loop.
//!
//! [`Station`] owns the three device boundaries for the lifetime of the
//! process and drives the handling cycle through the
//! [`StateMachine`]. Fault classification happens here and nowhere
//! else: a server rejection abandons the cycle, everything the loop
//! cannot classify terminates the station, and cancellation is a
//! controlled shutdown. On every exit path the tag reader is released
//! exactly once.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use weighpoint_core::{BatchId, Direction, OperatorId, StationConfig, Transaction};
use weighpoint_hardware::TagReader;
use weighpoint_scale::Scale;

use crate::api::InventoryApi;
use crate::fault::{CycleOutcome, Rejection, StationError};
use crate::state::{StateMachine, StationState};

/// Check-in/check-out station orchestrator.
///
/// Generic over the three capability traits so the entire loop runs
/// unchanged against mock devices in tests and against the real
/// reader, scale and HTTP client in production.
///
/// # Examples
///
/// ```no_run
/// use tokio_util::sync::CancellationToken;
/// use weighpoint_client::{InventoryClient, InventoryClientConfig};
/// use weighpoint_core::StationConfig;
/// use weighpoint_hardware::mock::MockTagReader;
/// use weighpoint_scale::SerialScale;
/// use weighpoint_station::Station;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = StationConfig::load("weighpoint.toml")?;
/// let (reader, _handle) = MockTagReader::new();
/// let scale = SerialScale::new(&config.scale);
/// let client = InventoryClient::new(InventoryClientConfig::from_station(&config))?;
///
/// let mut station = Station::new(reader, scale, client, &config)?;
/// station.run(CancellationToken::new()).await?;
/// # Ok(())
/// # }
/// ```
pub struct Station<R, S, A> {
    reader: R,
    scale: S,
    api: A,

    operator: OperatorId,
    direction: Direction,
    cycle_delay: Duration,

    machine: StateMachine,
    completed_cycles: u64,
    failed_cycles: u64,
}

impl<R, S, A> Station<R, S, A>
where
    R: TagReader,
    S: Scale,
    A: InventoryApi,
{
    /// Build a station from its devices and the loaded configuration.
    ///
    /// # Errors
    /// Returns a domain fault if the configured operator identifier is
    /// not valid.
    pub fn new(reader: R, scale: S, api: A, config: &StationConfig) -> Result<Self, StationError> {
        let operator = OperatorId::new(&config.station.operator_id)?;

        info!(
            endpoint = %config.server.endpoint,
            scale_port = %config.scale.usb_port,
            operator = %operator,
            direction = ?config.station.direction,
            "station configured"
        );

        Ok(Self {
            reader,
            scale,
            api,
            operator,
            direction: config.station.direction,
            cycle_delay: config.station.cycle_delay(),
            machine: StateMachine::new(),
            completed_cycles: 0,
            failed_cycles: 0,
        })
    }

    /// Current phase of the handling cycle.
    pub fn state(&self) -> &StationState {
        self.machine.current_state()
    }

    /// Number of cycles that ended with an acknowledged submission.
    pub fn completed_cycles(&self) -> u64 {
        self.completed_cycles
    }

    /// Number of cycles abandoned on a server rejection.
    pub fn failed_cycles(&self) -> u64 {
        self.failed_cycles
    }

    /// Run the station until cancelled or a fatal fault occurs.
    ///
    /// The tag reader is released exactly once before this method
    /// returns, on both the cancellation and the fatal path.
    ///
    /// # Errors
    /// Returns the first fatal [`StationError`]. Cancellation is not an
    /// error; the method returns `Ok(())`.
    pub async fn run(&mut self, cancel: CancellationToken) -> Result<(), StationError> {
        let result = self.run_loop(&cancel).await;

        if let Err(error) = &result {
            error!(
                %error,
                state = %self.machine.current_state(),
                state_age_ms = self.machine.time_in_current_state().as_millis() as u64,
                trail = ?self.machine.transition_trail(8),
                "fatal station fault, shutting down"
            );
            self.machine.reset();
        }

        match self.reader.release().await {
            Ok(()) => info!("tag reader released"),
            Err(release_error) => {
                // A failed release must not mask the fault that caused
                // the shutdown.
                if result.is_err() {
                    warn!(error = %release_error, "tag reader release failed during fault shutdown");
                } else {
                    return Err(release_error.into());
                }
            }
        }

        result
    }

    async fn run_loop(&mut self, cancel: &CancellationToken) -> Result<(), StationError> {
        info!("station running, waiting for tags");

        loop {
            let outcome = tokio::select! {
                () = cancel.cancelled() => {
                    info!("shutdown requested, stopping after current state");
                    return Ok(());
                }
                outcome = self.run_cycle() => outcome?,
            };

            debug_assert!(self.machine.current_state().is_terminal());
            match &outcome {
                CycleOutcome::Completed { batch, quantity } => {
                    info!(%batch, quantity, "cycle complete");
                }
                CycleOutcome::Failed(rejection) => {
                    warn!(%rejection, "cycle failed");
                }
            }

            self.machine.transition_to(StationState::Delay)?;
            tokio::select! {
                () = cancel.cancelled() => {
                    info!("shutdown requested during inter-cycle delay");
                    return Ok(());
                }
                () = tokio::time::sleep(self.cycle_delay) => {}
            }
            self.machine.transition_to(StationState::WaitForTag)?;
        }
    }

    /// Drive one handling cycle from tag presentation to its outcome.
    ///
    /// The machine must be in [`StationState::WaitForTag`]; [`run`]
    /// guarantees that between cycles. Exposed so a single pass can be
    /// exercised without the surrounding loop.
    ///
    /// # Errors
    /// Returns a fatal [`StationError`] for reader faults, scale
    /// timeouts or protocol corruption, transport faults, and invalid
    /// tag payloads. Server rejections are not errors; they yield
    /// [`CycleOutcome::Failed`].
    ///
    /// [`run`]: Station::run
    pub async fn run_cycle(&mut self) -> Result<CycleOutcome, StationError> {
        let tag = self.reader.read_tag().await?;
        debug!(uid = %tag.uid_hex(), "tag presented");

        let batch: BatchId = tag.payload.parse()?;

        self.machine.transition_to(StationState::ReadScale)?;
        let reading = self.scale.poll().await?;
        info!(%batch, quantity = reading.quantity, unit = reading.unit, "scale read");

        self.machine.transition_to(StationState::Authenticate)?;
        let Some(session) = self.api.authenticate().await? else {
            self.machine.transition_to(StationState::CycleFailed)?;
            self.failed_cycles += 1;
            return Ok(CycleOutcome::Failed(Rejection::Authentication));
        };

        self.machine.transition_to(StationState::Submit)?;
        let transaction = Transaction::new(
            self.operator.clone(),
            batch.clone(),
            reading.quantity,
            self.direction,
        )?;

        let Some(_response) = self.api.submit_transaction(&session, &transaction).await? else {
            self.machine.transition_to(StationState::CycleFailed)?;
            self.failed_cycles += 1;
            return Ok(CycleOutcome::Failed(Rejection::Submission));
        };

        self.machine.transition_to(StationState::CycleComplete)?;
        self.completed_cycles += 1;
        Ok(CycleOutcome::Completed {
            batch,
            quantity: reading.quantity,
        })
    }
}
