//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Controller (domain)
//! ```
//!
//! Driven adapters (lamps, button, buzzer, clock, event sinks) implement
//! these traits.  The [`Controller`](super::controller::Controller) and
//! the signal subsystems consume them via generics, so the domain core
//! never touches hardware directly.
//!
//! ## Conventions
//!
//! - Logical `true` always means asserted: lamp lit, button pressed,
//!   buzzer sounding.  Active-low wiring is resolved inside the adapters.
//! - Writes are infallible at this boundary.  A production adapter that
//!   can fail must decide its own policy (the `embedded-hal` adapters log).

use crate::config::Millis;

// ───────────────────────────────────────────────────────────────
// Digital output (lamps)
// ───────────────────────────────────────────────────────────────

/// A binary output such as one lamp of a signal head.
pub trait DigitalOutput {
    /// Drive the output.  Idempotent.
    fn set(&mut self, on: bool);

    /// The level most recently driven.
    fn read(&self) -> bool;

    fn on(&mut self) {
        self.set(true);
    }

    fn off(&mut self) {
        self.set(false);
    }

    /// Invert the current driven level.
    fn toggle(&mut self) {
        let lit = self.read();
        self.set(!lit);
    }
}

impl<T: DigitalOutput + ?Sized> DigitalOutput for &mut T {
    fn set(&mut self, on: bool) {
        (**self).set(on);
    }

    fn read(&self) -> bool {
        (**self).read()
    }
}

// ───────────────────────────────────────────────────────────────
// Digital input (request button)
// ───────────────────────────────────────────────────────────────

/// A raw, undebounced binary input.
pub trait DigitalInput {
    /// Current raw level (`true` = asserted).
    fn read(&mut self) -> bool;
}

impl<T: DigitalInput + ?Sized> DigitalInput for &mut T {
    fn read(&mut self) -> bool {
        (**self).read()
    }
}

// ───────────────────────────────────────────────────────────────
// Buzzer
// ───────────────────────────────────────────────────────────────

/// Audible signal output.  Tone and volume are the adapter's business.
pub trait BuzzerOutput {
    fn set(&mut self, on: bool);
}

impl<T: BuzzerOutput + ?Sized> BuzzerOutput for &mut T {
    fn set(&mut self, on: bool) {
        (**self).set(on);
    }
}

// ───────────────────────────────────────────────────────────────
// Clock
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock.
///
/// Timestamps must never go backwards; every component of the crossing
/// relies on `now - earlier` being meaningful.
pub trait Clock {
    fn now_ms(&self) -> Millis;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

/// Sink that drops every event.
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &super::events::AppEvent) {}
}
