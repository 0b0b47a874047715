//! Vehicle signal head (red / amber / green).
//!
//! Every `show_*` call leaves exactly one lamp lit.  Lamps are switched
//! off before the target is switched on; with a single poll thread no
//! observer can see the head mid-call.
//!
//! [`TrafficLights::show_fault`] is the only exception to the one-lamp
//! rule: amber flashes on its own [`PeriodicToggle`] so a fault is
//! distinguishable from a nominal amber phase.

use crate::app::ports::DigitalOutput;
use crate::config::{FAULT_FLASH_PERIOD_MS, Millis};
use crate::drivers::periodic::PeriodicToggle;

/// What the vehicle head is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrafficAspect {
    Red,
    Amber,
    Green,
    /// Flashing amber fault indicator.
    FaultFlash,
}

pub struct TrafficLights<O> {
    red: O,
    amber: O,
    green: O,
    fault_flash: PeriodicToggle,
    aspect: TrafficAspect,
}

impl<O: DigitalOutput> TrafficLights<O> {
    /// Take the three lamps and show red until the controller renders.
    pub fn new(red: O, amber: O, green: O) -> Self {
        let mut lights = Self {
            red,
            amber,
            green,
            fault_flash: PeriodicToggle::new(FAULT_FLASH_PERIOD_MS),
            aspect: TrafficAspect::Red,
        };
        lights.show_red();
        lights
    }

    pub fn show_red(&mut self) {
        self.fault_flash.set_enabled(false);
        self.amber.off();
        self.green.off();
        self.red.on();
        self.aspect = TrafficAspect::Red;
    }

    pub fn show_amber(&mut self) {
        self.fault_flash.set_enabled(false);
        self.red.off();
        self.green.off();
        self.amber.on();
        self.aspect = TrafficAspect::Amber;
    }

    pub fn show_green(&mut self) {
        self.fault_flash.set_enabled(false);
        self.red.off();
        self.amber.off();
        self.green.on();
        self.aspect = TrafficAspect::Green;
    }

    /// Flashing amber, red and green dark.  Starts lit on entry.
    pub fn show_fault(&mut self, now_ms: Millis) {
        self.red.off();
        self.green.off();
        if !self.fault_flash.is_enabled() {
            self.fault_flash.set_enabled(true);
            self.amber.on();
        }
        if self.fault_flash.poll(now_ms) {
            self.amber.toggle();
        }
        self.aspect = TrafficAspect::FaultFlash;
    }

    pub fn aspect(&self) -> TrafficAspect {
        self.aspect
    }

    /// Driven levels as `[red, amber, green]`.
    pub fn lit(&self) -> [bool; 3] {
        [self.red.read(), self.amber.read(), self.green.read()]
    }
}
