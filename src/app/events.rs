//! Outbound application events.
//!
//! The [`Controller`](super::controller::Controller) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the
//! other side decide what to do with them (serial log, test recorder).

use crate::config::Millis;
use crate::drivers::pedestrian::PedestrianMode;
use crate::drivers::traffic::TrafficAspect;
use crate::error::Error;
use crate::fsm::StateId;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The controller has started (carries initial state).
    Started(StateId),

    /// The FSM transitioned between states.
    StateChanged {
        from: StateId,
        to: StateId,
        at_ms: Millis,
    },

    /// A button edge (or software request) was accepted; a pedestrian is waiting.
    RequestAccepted { at_ms: Millis },

    /// The waiting request was cleared at the end of a crossing cycle.
    RequestAcknowledged,

    /// The controller was forced into ERROR.
    FaultEntered(Error),

    /// ERROR was left through a manual reset.
    ResetFromFault,

    /// Periodic status snapshot.
    Telemetry(Status),
}

/// A point-in-time status snapshot suitable for logging or tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub state: StateId,
    pub elapsed_ms: Millis,
    pub request_pending: bool,
    pub traffic: TrafficAspect,
    pub pedestrian: PedestrianMode,
    pub buzzer_active: bool,
    pub cycles_completed: u64,
}
