//! Inbound commands to the controller.
//!
//! These represent actions requested from outside the polling loop (a
//! maintenance console, a test harness) that the
//! [`Controller`](super::controller::Controller) interprets and acts upon.

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Software crossing request.  Subject to the same debounce rule as
    /// the physical button.
    RequestCrossing,

    /// Leave ERROR and restart the sequence from IDLE.
    Reset,

    /// Load a raw state value (maintenance only).  ERROR is always
    /// accepted and IDLE only out of ERROR; the crossing states are
    /// refused.  Values outside the defined states drive the controller
    /// into ERROR.
    ForceState(u8),
}
