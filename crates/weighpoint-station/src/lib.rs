//! Orchestration loop for the Weighpoint station.
//!
//! This crate sequences the three device boundaries (tag reader,
//! serial scale, inventory API) into the cycle
//!
//! ```text
//! WaitForTag → ReadScale → Authenticate → Submit
//!            → (CycleComplete | CycleFailed) → Delay → WaitForTag
//! ```
//!
//! and is the *single* place where faults are classified: server
//! rejections abandon the cycle and the loop continues; scale protocol
//! corruption and unclassified hardware/transport faults terminate the
//! station after releasing the reader exactly once; an external
//! interrupt is a controlled shutdown, not an error. A station that
//! cannot classify its own failure does not keep operating unattended.

#![allow(async_fn_in_trait)]

pub mod api;
pub mod fault;
pub mod state;
pub mod station;

pub use api::InventoryApi;
pub use fault::{CycleOutcome, Rejection, StationError};
pub use state::{StateMachine, StationState};
pub use station::Station;
