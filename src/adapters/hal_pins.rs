//! `embedded-hal` 1.0 adapters for the lamp, button and buzzer ports.
//!
//! Any HAL whose pins implement [`OutputPin`] / [`InputPin`] and whose PWM
//! channel implements [`SetDutyCycle`] plugs in here; on the ESP32-S3
//! that is `esp_idf_hal::gpio::PinDriver` and `esp_idf_hal::ledc::LedcDriver`.
//!
//! HAL errors are logged and swallowed.  Each adapter keeps the level it
//! was asked to drive so [`DigitalOutput::read`] never touches the bus.

use embedded_hal::digital::{Error as _, InputPin, OutputPin, PinState};
use embedded_hal::pwm::{Error as _, SetDutyCycle};
use log::{error, warn};

use crate::app::ports::{BuzzerOutput, DigitalInput, DigitalOutput};

// ───────────────────────────────────────────────────────────────
// Lamp output
// ───────────────────────────────────────────────────────────────

pub struct HalOutput<P> {
    pin: P,
    active_low: bool,
    lit: bool,
    name: &'static str,
}

impl<P: OutputPin> HalOutput<P> {
    /// Wrap `pin` and drive it dark.
    pub fn new(pin: P, name: &'static str) -> Self {
        Self::with_polarity(pin, name, false)
    }

    pub fn with_polarity(pin: P, name: &'static str, active_low: bool) -> Self {
        let mut out = Self {
            pin,
            active_low,
            lit: true,
            name,
        };
        out.set(false);
        out
    }
}

impl<P: OutputPin> DigitalOutput for HalOutput<P> {
    fn set(&mut self, on: bool) {
        let level = PinState::from(on != self.active_low);
        if let Err(e) = self.pin.set_state(level) {
            error!("{}: set_state failed: {:?}", self.name, e.kind());
        }
        self.lit = on;
    }

    fn read(&self) -> bool {
        self.lit
    }
}

// ───────────────────────────────────────────────────────────────
// Button input
// ───────────────────────────────────────────────────────────────

/// Button wired to ground with a pull-up: pressed reads low.
pub struct HalInput<P> {
    pin: P,
}

impl<P: InputPin> HalInput<P> {
    pub fn active_low(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: InputPin> DigitalInput for HalInput<P> {
    fn read(&mut self) -> bool {
        match self.pin.is_low() {
            Ok(low) => low,
            Err(e) => {
                warn!("Button: read failed: {:?}", e.kind());
                false
            }
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Buzzer (PWM tone)
// ───────────────────────────────────────────────────────────────

/// Piezo buzzer on a PWM channel.  The tone frequency is fixed by the
/// channel's timer; this adapter only gates the duty cycle.
pub struct PwmBuzzer<P> {
    channel: P,
    duty_percent: u8,
}

impl<P: SetDutyCycle> PwmBuzzer<P> {
    pub fn new(channel: P, duty_percent: u8) -> Self {
        let mut buzzer = Self {
            channel,
            duty_percent: duty_percent.min(100),
        };
        buzzer.set(false);
        buzzer
    }
}

impl<P: SetDutyCycle> BuzzerOutput for PwmBuzzer<P> {
    fn set(&mut self, on: bool) {
        let result = if on {
            self.channel.set_duty_cycle_percent(self.duty_percent)
        } else {
            self.channel.set_duty_cycle_fully_off()
        };
        if let Err(e) = result {
            error!("Buzzer: duty update failed: {:?}", e.kind());
        }
    }
}
