//! Audible crossing signal.
//!
//! While active the buzzer sounds immediately and then pulses on/off
//! every [`BUZZER_PULSE_PERIOD_MS`] via its own [`PeriodicToggle`].
//! "Active" is the walk-coupled enable; the instantaneous tone level is
//! an implementation detail of the pulse.

use crate::app::ports::BuzzerOutput;
use crate::config::{BUZZER_PULSE_PERIOD_MS, Millis};
use crate::drivers::periodic::PeriodicToggle;

pub struct AudibleSignal<Z> {
    buzzer: Z,
    pulse: PeriodicToggle,
    active: bool,
    sounding: bool,
}

impl<Z: BuzzerOutput> AudibleSignal<Z> {
    pub fn new(mut buzzer: Z) -> Self {
        buzzer.set(false);
        Self {
            buzzer,
            pulse: PeriodicToggle::new(BUZZER_PULSE_PERIOD_MS),
            active: false,
            sounding: false,
        }
    }

    /// Keep the signal running.  Call every poll while pedestrians may walk.
    pub fn activate(&mut self, now_ms: Millis) {
        if !self.active {
            self.active = true;
            self.pulse.set_enabled(true);
            self.drive(true);
        }
        if self.pulse.poll(now_ms) {
            self.drive(!self.sounding);
        }
    }

    /// Stop the signal.  Idempotent.
    pub fn silence(&mut self) {
        self.active = false;
        self.pulse.set_enabled(false);
        self.drive(false);
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Instantaneous tone level (pulse phase).
    pub fn is_sounding(&self) -> bool {
        self.sounding
    }

    fn drive(&mut self, on: bool) {
        self.sounding = on;
        self.buzzer.set(on);
    }
}
