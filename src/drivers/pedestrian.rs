//! Pedestrian signal head, request button and audible signal.
//!
//! | Mode    | Red        | Green | Buzzer  |
//! |---------|------------|-------|---------|
//! | Stop    | steady on  | off   | silent  |
//! | Walk    | off        | on    | pulsing |
//! | Warning | flashing   | off   | silent  |
//!
//! The flashing red uses its own [`PeriodicToggle`].  Leaving Warning
//! disables it, so a later Warning starts a fresh period instead of
//! resuming a stale one.

use log::debug;

use crate::app::ports::{BuzzerOutput, DigitalInput, DigitalOutput};
use crate::config::{FLASH_PERIOD_MS, Millis};
use crate::drivers::buzzer::AudibleSignal;
use crate::drivers::debounce::{DebouncedInput, EdgeLatch};
use crate::drivers::periodic::PeriodicToggle;

/// Which pedestrian aspect is active.  Warning counts as active
/// regardless of the instantaneous flash phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PedestrianMode {
    Stop,
    Walk,
    Warning,
}

pub struct PedestrianSignals<O, I, Z> {
    red: O,
    green: O,
    button_pin: I,
    button: DebouncedInput,
    edge_latch: Option<&'static EdgeLatch>,
    buzzer: AudibleSignal<Z>,
    flash: PeriodicToggle,
    mode: PedestrianMode,
}

impl<O, I, Z> PedestrianSignals<O, I, Z>
where
    O: DigitalOutput,
    I: DigitalInput,
    Z: BuzzerOutput,
{
    /// Take the lamps, button and buzzer and show Stop.
    pub fn new(red: O, green: O, button_pin: I, buzzer: Z) -> Self {
        let mut signals = Self {
            red,
            green,
            button_pin,
            button: DebouncedInput::default(),
            edge_latch: None,
            buzzer: AudibleSignal::new(buzzer),
            flash: PeriodicToggle::new(FLASH_PERIOD_MS),
            mode: PedestrianMode::Stop,
        };
        signals.show_stop();
        signals
    }

    /// Also take accepted edges from an interrupt-fed latch.
    ///
    /// The ISR stamps edges with `now_ms as u32`; the latch compares them
    /// with wrapping arithmetic, so only the 200 ms spacing matters.
    #[must_use]
    pub fn with_edge_latch(mut self, latch: &'static EdgeLatch) -> Self {
        self.edge_latch = Some(latch);
        self
    }

    pub fn show_stop(&mut self) {
        self.flash.set_enabled(false);
        self.green.off();
        self.red.on();
        self.buzzer.silence();
        self.mode = PedestrianMode::Stop;
    }

    pub fn show_walk(&mut self, now_ms: Millis) {
        self.flash.set_enabled(false);
        self.red.off();
        self.green.on();
        self.buzzer.activate(now_ms);
        self.mode = PedestrianMode::Walk;
    }

    /// Flashing red.  Starts lit on entry.
    pub fn show_warning(&mut self, now_ms: Millis) {
        self.green.off();
        self.buzzer.silence();
        if !self.flash.is_enabled() {
            self.flash.set_enabled(true);
            self.red.on();
        }
        if self.flash.poll(now_ms) {
            self.red.toggle();
        }
        self.mode = PedestrianMode::Warning;
    }

    /// Sample the button once.  Returns `true` if a new request was accepted.
    pub fn sample_button(&mut self, now_ms: Millis) -> bool {
        let level = self.button_pin.read();
        let mut accepted = self.button.sample(now_ms, level);
        if let Some(latch) = self.edge_latch {
            accepted |= self.button.absorb_latched(latch);
        }
        if accepted {
            debug!("Button: request accepted at {}ms", now_ms);
        }
        accepted
    }

    /// Software request, same debounce rule as the button.
    pub fn request_crossing(&mut self, now_ms: Millis) -> bool {
        self.button.register_edge(now_ms)
    }

    pub fn request_pending(&self) -> bool {
        self.button.is_pending()
    }

    pub fn acknowledge_request(&mut self) {
        self.button.acknowledge();
    }

    pub fn mode(&self) -> PedestrianMode {
        self.mode
    }

    pub fn buzzer_active(&self) -> bool {
        self.buzzer.is_active()
    }

    /// Driven lamp levels as `[red, green]`.
    pub fn lit(&self) -> [bool; 2] {
        [self.red.read(), self.green.read()]
    }
}
