//! Handling cycle state machine.
//!
//! Tracks the phase of the current check-in/check-out cycle and rejects
//! illegal phase jumps, so the orchestration loop cannot (for example)
//! submit a transaction without having read the scale first.
//!
//! # Valid Transitions
//!
//! - WaitForTag → ReadScale → Authenticate → Submit → CycleComplete
//! - Authenticate → CycleFailed (session rejected)
//! - Submit → CycleFailed (submission rejected)
//! - CycleComplete/CycleFailed → Delay → WaitForTag
//!
//! # Examples
//!
//! ```
//! use weighpoint_station::{StateMachine, StationState};
//!
//! let mut machine = StateMachine::new();
//! assert_eq!(machine.current_state(), &StationState::WaitForTag);
//!
//! machine.transition_to(StationState::ReadScale).unwrap();
//! assert_eq!(machine.current_state(), &StationState::ReadScale);
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::fault::StationError;

/// Maximum number of state transitions to keep in history.
///
/// A full cycle is six transitions, so 96 covers the last sixteen
/// cycles, which is enough context to reconstruct a fault report
/// without unbounded growth on a long-lived station process.
const MAX_HISTORY_SIZE: usize = 96;

/// Phases of a single handling cycle.
///
/// Each state corresponds to a blocking step of the cycle; the loop
/// moves through them strictly in order and returns to [`WaitForTag`]
/// (via [`Delay`]) after every cycle, successful or not.
///
/// [`WaitForTag`]: StationState::WaitForTag
/// [`Delay`]: StationState::Delay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StationState {
    /// Blocked on the tag reader, waiting for a batch tag.
    WaitForTag,

    /// Polling the scale for the current net weight.
    ReadScale,

    /// Exchanging the API key for a session token.
    Authenticate,

    /// Submitting the transaction to the inventory server.
    Submit,

    /// Transaction acknowledged by the server.
    CycleComplete,

    /// Cycle abandoned on a recoverable rejection.
    CycleFailed,

    /// Inter-cycle pause before accepting the next tag.
    Delay,
}

impl fmt::Display for StationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state_str = match self {
            StationState::WaitForTag => "WaitForTag",
            StationState::ReadScale => "ReadScale",
            StationState::Authenticate => "Authenticate",
            StationState::Submit => "Submit",
            StationState::CycleComplete => "CycleComplete",
            StationState::CycleFailed => "CycleFailed",
            StationState::Delay => "Delay",
        };
        write!(f, "{}", state_str)
    }
}

impl StationState {
    /// Check if transition to target state is valid from this state.
    ///
    /// # Examples
    ///
    /// ```
    /// use weighpoint_station::StationState;
    ///
    /// assert!(StationState::WaitForTag.can_transition_to(&StationState::ReadScale));
    /// assert!(!StationState::WaitForTag.can_transition_to(&StationState::Submit));
    /// ```
    pub fn can_transition_to(&self, target: &StationState) -> bool {
        matches!(
            (self, target),
            // From WaitForTag
            (StationState::WaitForTag, StationState::ReadScale)
            // From ReadScale
            | (StationState::ReadScale, StationState::Authenticate)
            // From Authenticate
            | (StationState::Authenticate, StationState::Submit | StationState::CycleFailed)
            // From Submit
            | (StationState::Submit, StationState::CycleComplete | StationState::CycleFailed)
            // From the two terminal cycle states
            | (StationState::CycleComplete | StationState::CycleFailed, StationState::Delay)
            // From Delay
            | (StationState::Delay, StationState::WaitForTag)
        )
    }

    /// Whether this state ends a cycle (successfully or not).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            StationState::CycleComplete | StationState::CycleFailed
        )
    }
}

/// A single recorded state transition.
///
/// The `timestamp` field is not serialized; `Instant` is
/// process-specific, so deserialized records get the current time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state transitioned from.
    pub from: StationState,

    /// The state transitioned to.
    pub to: StationState,

    /// When the transition occurred.
    #[serde(skip, default = "Instant::now")]
    pub timestamp: Instant,
}

impl StateTransition {
    pub fn new(from: StationState, to: StationState) -> Self {
        Self {
            from,
            to,
            timestamp: Instant::now(),
        }
    }

    /// Duration since this transition occurred.
    pub fn elapsed(&self) -> Duration {
        self.timestamp.elapsed()
    }
}

/// State machine for the handling cycle.
///
/// Enforces valid transitions and keeps a bounded transition history
/// for fault reports.
///
/// Not thread-safe by design; the orchestration loop owns it
/// exclusively.
///
/// # Examples
///
/// ```
/// use weighpoint_station::{StateMachine, StationState};
///
/// let mut machine = StateMachine::new();
/// machine.transition_to(StationState::ReadScale).unwrap();
/// machine.transition_to(StationState::Authenticate).unwrap();
/// assert_eq!(machine.history().len(), 2);
/// ```
pub struct StateMachine {
    /// Current phase of the cycle.
    current_state: StationState,

    /// When the current state was entered.
    state_entered_at: Instant,

    /// History of state transitions (limited to MAX_HISTORY_SIZE).
    history: VecDeque<StateTransition>,
}

impl StateMachine {
    /// Create a new state machine in the WaitForTag state.
    pub fn new() -> Self {
        Self {
            current_state: StationState::WaitForTag,
            state_entered_at: Instant::now(),
            history: VecDeque::with_capacity(MAX_HISTORY_SIZE),
        }
    }

    /// Get the current state of the machine.
    pub fn current_state(&self) -> &StationState {
        &self.current_state
    }

    /// Time elapsed in the current state.
    pub fn time_in_current_state(&self) -> Duration {
        self.state_entered_at.elapsed()
    }

    /// Reference to the transition history, oldest to newest.
    pub fn history(&self) -> &VecDeque<StateTransition> {
        &self.history
    }

    /// The most recent `count` transitions, oldest first.
    pub fn last_transitions(&self, count: usize) -> Vec<StateTransition> {
        self.history()
            .iter()
            .rev()
            .take(count)
            .rev()
            .cloned()
            .collect()
    }

    /// The most recent `count` transitions rendered for a fault report,
    /// oldest first, e.g. `"ReadScale->Authenticate (+12ms)"`.
    pub fn transition_trail(&self, count: usize) -> Vec<String> {
        self.last_transitions(count)
            .iter()
            .map(|t| format!("{}->{} (+{}ms)", t.from, t.to, t.elapsed().as_millis()))
            .collect()
    }

    /// Transition to a new state, validating the transition.
    ///
    /// # Errors
    ///
    /// Returns [`StationError::InvalidStateTransition`] if the
    /// requested transition is not legal from the current state.
    ///
    /// # Examples
    ///
    /// ```
    /// use weighpoint_station::{StateMachine, StationState};
    ///
    /// let mut machine = StateMachine::new();
    /// let transition = machine.transition_to(StationState::ReadScale).unwrap();
    /// assert_eq!(transition.from, StationState::WaitForTag);
    ///
    /// assert!(machine.transition_to(StationState::Delay).is_err());
    /// ```
    pub fn transition_to(&mut self, new_state: StationState) -> Result<StateTransition, StationError> {
        if !self.current_state.can_transition_to(&new_state) {
            return Err(StationError::InvalidStateTransition {
                from: self.current_state.to_string(),
                to: new_state.to_string(),
            });
        }

        let transition = StateTransition::new(self.current_state, new_state);

        self.current_state = new_state;
        self.state_entered_at = Instant::now();
        self.add_to_history(transition.clone());

        Ok(transition)
    }

    /// Reset the machine to WaitForTag regardless of current state.
    ///
    /// Used by the loop after a fatal fault so a restarted station
    /// starts a fresh cycle rather than resuming a poisoned one.
    pub fn reset(&mut self) -> StateTransition {
        let transition = StateTransition::new(self.current_state, StationState::WaitForTag);
        self.current_state = StationState::WaitForTag;
        self.state_entered_at = Instant::now();
        self.add_to_history(transition.clone());
        transition
    }

    fn add_to_history(&mut self, transition: StateTransition) {
        self.history.push_back(transition);
        if self.history.len() > MAX_HISTORY_SIZE {
            self.history.pop_front();
        }
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine_at(states: &[StationState]) -> StateMachine {
        let mut machine = StateMachine::new();
        for state in states {
            machine.transition_to(*state).unwrap();
        }
        machine
    }

    #[test]
    fn test_new_machine_starts_waiting_for_tag() {
        let machine = StateMachine::new();
        assert_eq!(machine.current_state(), &StationState::WaitForTag);
        assert_eq!(machine.history().len(), 0);
    }

    #[test]
    fn test_valid_transition_wait_for_tag_to_read_scale() {
        let mut machine = StateMachine::new();
        let result = machine.transition_to(StationState::ReadScale);

        assert!(result.is_ok());
        assert_eq!(machine.current_state(), &StationState::ReadScale);

        let transition = result.unwrap();
        assert_eq!(transition.from, StationState::WaitForTag);
        assert_eq!(transition.to, StationState::ReadScale);
    }

    #[test]
    fn test_valid_transition_read_scale_to_authenticate() {
        let mut machine = machine_at(&[StationState::ReadScale]);
        let result = machine.transition_to(StationState::Authenticate);

        assert!(result.is_ok());
        assert_eq!(machine.current_state(), &StationState::Authenticate);
    }

    #[test]
    fn test_valid_transition_authenticate_to_submit() {
        let mut machine = machine_at(&[StationState::ReadScale, StationState::Authenticate]);
        let result = machine.transition_to(StationState::Submit);

        assert!(result.is_ok());
        assert_eq!(machine.current_state(), &StationState::Submit);
    }

    #[test]
    fn test_valid_transition_authenticate_to_cycle_failed() {
        let mut machine = machine_at(&[StationState::ReadScale, StationState::Authenticate]);
        let result = machine.transition_to(StationState::CycleFailed);

        assert!(result.is_ok());
        assert_eq!(machine.current_state(), &StationState::CycleFailed);
    }

    #[test]
    fn test_valid_transition_submit_to_cycle_complete() {
        let mut machine = machine_at(&[
            StationState::ReadScale,
            StationState::Authenticate,
            StationState::Submit,
        ]);
        let result = machine.transition_to(StationState::CycleComplete);

        assert!(result.is_ok());
        assert_eq!(machine.current_state(), &StationState::CycleComplete);
    }

    #[test]
    fn test_valid_transition_submit_to_cycle_failed() {
        let mut machine = machine_at(&[
            StationState::ReadScale,
            StationState::Authenticate,
            StationState::Submit,
        ]);
        let result = machine.transition_to(StationState::CycleFailed);

        assert!(result.is_ok());
        assert_eq!(machine.current_state(), &StationState::CycleFailed);
    }

    #[test]
    fn test_valid_transition_terminal_states_to_delay() {
        let mut machine = machine_at(&[
            StationState::ReadScale,
            StationState::Authenticate,
            StationState::Submit,
            StationState::CycleComplete,
        ]);
        assert!(machine.transition_to(StationState::Delay).is_ok());

        let mut machine = machine_at(&[
            StationState::ReadScale,
            StationState::Authenticate,
            StationState::CycleFailed,
        ]);
        assert!(machine.transition_to(StationState::Delay).is_ok());
    }

    #[test]
    fn test_valid_transition_delay_to_wait_for_tag() {
        let mut machine = machine_at(&[
            StationState::ReadScale,
            StationState::Authenticate,
            StationState::CycleFailed,
            StationState::Delay,
        ]);
        let result = machine.transition_to(StationState::WaitForTag);

        assert!(result.is_ok());
        assert_eq!(machine.current_state(), &StationState::WaitForTag);
    }

    #[test]
    fn test_invalid_transition_wait_for_tag_to_submit() {
        let mut machine = StateMachine::new();
        let result = machine.transition_to(StationState::Submit);

        assert!(result.is_err());
        assert_eq!(machine.current_state(), &StationState::WaitForTag);
    }

    #[test]
    fn test_invalid_transition_read_scale_to_cycle_complete() {
        let mut machine = machine_at(&[StationState::ReadScale]);
        let result = machine.transition_to(StationState::CycleComplete);

        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_transition_wait_for_tag_to_cycle_failed() {
        let mut machine = StateMachine::new();
        assert!(machine.transition_to(StationState::CycleFailed).is_err());
    }

    #[test]
    fn test_invalid_transition_cycle_complete_to_wait_for_tag() {
        let mut machine = machine_at(&[
            StationState::ReadScale,
            StationState::Authenticate,
            StationState::Submit,
            StationState::CycleComplete,
        ]);
        assert!(machine.transition_to(StationState::WaitForTag).is_err());
    }

    #[test]
    fn test_invalid_transition_error_names_states() {
        let mut machine = StateMachine::new();
        let error = machine.transition_to(StationState::Delay).unwrap_err();
        let message = error.to_string();
        assert!(message.contains("WaitForTag"));
        assert!(message.contains("Delay"));
    }

    #[test]
    fn test_transition_history_is_recorded() {
        let machine = machine_at(&[
            StationState::ReadScale,
            StationState::Authenticate,
            StationState::Submit,
        ]);

        assert_eq!(machine.history().len(), 3);

        let history: Vec<_> = machine.history().iter().collect();
        assert_eq!(history[0].from, StationState::WaitForTag);
        assert_eq!(history[0].to, StationState::ReadScale);
        assert_eq!(history[2].from, StationState::Authenticate);
        assert_eq!(history[2].to, StationState::Submit);
    }

    #[test]
    fn test_last_transitions_returns_most_recent() {
        let machine = machine_at(&[
            StationState::ReadScale,
            StationState::Authenticate,
            StationState::Submit,
        ]);

        let last_two = machine.last_transitions(2);
        assert_eq!(last_two.len(), 2);
        assert_eq!(last_two[0].from, StationState::ReadScale);
        assert_eq!(last_two[1].from, StationState::Authenticate);
    }

    #[test]
    fn test_transition_trail_renders_recent_transitions() {
        let machine = machine_at(&[
            StationState::ReadScale,
            StationState::Authenticate,
            StationState::Submit,
        ]);

        let trail = machine.transition_trail(2);
        assert_eq!(trail.len(), 2);
        assert!(trail[0].starts_with("ReadScale->Authenticate"));
        assert!(trail[1].starts_with("Authenticate->Submit"));
    }

    #[test]
    fn test_history_size_limit() {
        let mut machine = StateMachine::new();

        // Run more full cycles than fit in the history.
        for _ in 0..32 {
            machine.transition_to(StationState::ReadScale).unwrap();
            machine.transition_to(StationState::Authenticate).unwrap();
            machine.transition_to(StationState::Submit).unwrap();
            machine.transition_to(StationState::CycleComplete).unwrap();
            machine.transition_to(StationState::Delay).unwrap();
            machine.transition_to(StationState::WaitForTag).unwrap();
        }

        assert_eq!(machine.history().len(), MAX_HISTORY_SIZE);
    }

    #[test]
    fn test_reset_returns_to_wait_for_tag() {
        let mut machine = machine_at(&[StationState::ReadScale, StationState::Authenticate]);

        let transition = machine.reset();

        assert_eq!(machine.current_state(), &StationState::WaitForTag);
        assert_eq!(transition.from, StationState::Authenticate);
        assert_eq!(transition.to, StationState::WaitForTag);
    }

    #[test]
    fn test_is_terminal() {
        assert!(StationState::CycleComplete.is_terminal());
        assert!(StationState::CycleFailed.is_terminal());
        assert!(!StationState::WaitForTag.is_terminal());
        assert!(!StationState::Delay.is_terminal());
    }

    #[test]
    fn test_complete_successful_cycle_flow() {
        let machine = machine_at(&[
            StationState::ReadScale,
            StationState::Authenticate,
            StationState::Submit,
            StationState::CycleComplete,
            StationState::Delay,
            StationState::WaitForTag,
        ]);

        assert_eq!(machine.current_state(), &StationState::WaitForTag);
        assert_eq!(machine.history().len(), 6);
    }

    #[test]
    fn test_complete_rejected_cycle_flow() {
        let machine = machine_at(&[
            StationState::ReadScale,
            StationState::Authenticate,
            StationState::CycleFailed,
            StationState::Delay,
            StationState::WaitForTag,
        ]);

        assert_eq!(machine.current_state(), &StationState::WaitForTag);
        assert_eq!(machine.history().len(), 5);
    }

    #[test]
    fn test_state_display_formatting() {
        assert_eq!(StationState::WaitForTag.to_string(), "WaitForTag");
        assert_eq!(StationState::ReadScale.to_string(), "ReadScale");
        assert_eq!(StationState::Authenticate.to_string(), "Authenticate");
        assert_eq!(StationState::Submit.to_string(), "Submit");
        assert_eq!(StationState::CycleComplete.to_string(), "CycleComplete");
        assert_eq!(StationState::CycleFailed.to_string(), "CycleFailed");
        assert_eq!(StationState::Delay.to_string(), "Delay");
    }

    #[test]
    fn test_state_serialization() {
        let state = StationState::WaitForTag;
        let serialized = serde_json::to_string(&state).unwrap();
        assert_eq!(serialized, "\"wait_for_tag\"");

        let deserialized: StationState = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, state);
    }

    #[test]
    fn test_transition_elapsed_time() {
        let transition = StateTransition::new(StationState::WaitForTag, StationState::ReadScale);
        assert!(transition.elapsed() < Duration::from_secs(1));
    }
}
