//! Shared mutable context threaded through every FSM handler.
//!
//! `FsmContext` is the single struct that state handlers read from and
//! write to: the poll timestamp, time spent in the current state, the
//! pedestrian request flag, and the signal commands the controller
//! applies to the subsystems after each tick.

use crate::config::{DWELL_MS, Millis};
use crate::drivers::pedestrian::PedestrianMode;
use crate::drivers::traffic::TrafficAspect;

// ---------------------------------------------------------------------------
// Signal commands (written by state handlers; consumed by the controller)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalCommands {
    pub traffic: TrafficAspect,
    pub pedestrian: PedestrianMode,
    /// Clear the pending pedestrian request after this tick.
    pub acknowledge_request: bool,
}

impl SignalCommands {
    /// The conservative configuration: amber fault flash, don't walk.
    pub fn safe() -> Self {
        Self {
            traffic: TrafficAspect::FaultFlash,
            pedestrian: PedestrianMode::Stop,
            acknowledge_request: false,
        }
    }
}

impl Default for SignalCommands {
    fn default() -> Self {
        Self::safe()
    }
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
#[derive(Debug, Clone, Default)]
pub struct FsmContext {
    // -- Timing --
    /// Timestamp of the poll being processed.
    pub now_ms: Millis,
    /// Milliseconds since the current state was entered.
    pub elapsed_ms: Millis,

    // -- Inputs --
    /// Debounced, sticky pedestrian request.
    pub request_pending: bool,

    // -- Outputs --
    pub commands: SignalCommands,
}

impl FsmContext {
    pub fn new(now_ms: Millis) -> Self {
        Self {
            now_ms,
            ..Self::default()
        }
    }

    /// Minimum dwell for the current state has been served.
    pub fn dwell_served(&self) -> bool {
        self.elapsed_ms >= DWELL_MS
    }
}
