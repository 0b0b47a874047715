//! System configuration parameters
//!
//! The crossing timing plan is fixed for this design and lives in the
//! constants below.  [`SystemConfig`] only carries runtime settings that
//! never change the sequence: the driver loop cadence, telemetry rate and
//! the (cosmetic) buzzer tone.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Monotonic timestamp / duration in milliseconds.
pub type Millis = u64;

// --- Timing plan (fixed) ---

/// Minimum dwell in every nominal state (IDLE gate, CHANGE, WALK, WALK_WARNING).
pub const DWELL_MS: Millis = 5_000;
/// Debounce window for the crossing-request button.
pub const DEBOUNCE_MS: Millis = 200;
/// Half-period of the flashing pedestrian "don't walk" light.
pub const FLASH_PERIOD_MS: Millis = 500;
/// Half-period of the audible crossing signal pulse.
pub const BUZZER_PULSE_PERIOD_MS: Millis = 500;
/// Half-period of the flashing amber fault indicator.
pub const FAULT_FLASH_PERIOD_MS: Millis = 500;

/// Longest driver poll interval that still keeps the dwell guards honest.
pub const MAX_POLL_INTERVAL_MS: u32 = 200;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Driver loop interval between `Controller::update` calls (milliseconds)
    pub poll_interval_ms: u32,
    /// Status telemetry interval (seconds)
    pub telemetry_interval_secs: u32,
    /// Buzzer tone frequency (Hz)
    pub buzzer_tone_hz: u32,
    /// Buzzer PWM duty while sounding (1-100%)
    pub buzzer_duty_percent: u8,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,       // 10 Hz
            telemetry_interval_secs: 10, // one status line every 10 s
            buzzer_tone_hz: 500,
            buzzer_duty_percent: 50,
        }
    }
}

impl SystemConfig {
    /// Reject settings the controller cannot run safely with.
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_ms == 0 {
            return Err(Error::Config("poll_interval_ms must be non-zero"));
        }
        if self.poll_interval_ms > MAX_POLL_INTERVAL_MS {
            return Err(Error::Config("poll_interval_ms exceeds 200 ms"));
        }
        if self.buzzer_tone_hz == 0 {
            return Err(Error::Config("buzzer_tone_hz must be non-zero"));
        }
        if self.buzzer_duty_percent == 0 || self.buzzer_duty_percent > 100 {
            return Err(Error::Config("buzzer_duty_percent out of range 1-100"));
        }
        Ok(())
    }

    /// Telemetry interval expressed in milliseconds.
    pub fn telemetry_interval_ms(&self) -> Millis {
        Millis::from(self.telemetry_interval_secs) * 1000
    }
}
