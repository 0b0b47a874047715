//! Non-blocking periodic toggle.
//!
//! Replaces sleep-based blinking.  The owner polls [`PeriodicToggle::poll`]
//! once per control cycle; when it returns `true` the owner flips its own
//! output.  Flashing lamps and the pulsing buzzer each own an independent
//! instance, so their phases never interfere even when periods match.
//!
//! ```text
//!  enable ─┐            period            period
//!          ▼      ◀──────────────▶ ◀──────────────▶
//!  poll:   A  .  .  .  .  .  .  T  .  .  .  .  .  T
//!          └ anchors the period, never toggles
//! ```

use crate::config::Millis;

/// Toggle-at-most-once-per-period timer.
#[derive(Debug, Clone)]
pub struct PeriodicToggle {
    period_ms: Millis,
    enabled: bool,
    /// `None` right after enabling; the next poll anchors the period.
    last_toggle_ms: Option<Millis>,
}

impl PeriodicToggle {
    pub fn new(period_ms: Millis) -> Self {
        Self {
            period_ms,
            enabled: false,
            last_toggle_ms: None,
        }
    }

    /// Enable or disable.  Idempotent.  Enabling a disabled toggle never
    /// toggles immediately: the first toggle waits a full period.
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled && !self.enabled {
            self.last_toggle_ms = None;
        }
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns `true` when the caller should flip its output now.
    pub fn poll(&mut self, now_ms: Millis) -> bool {
        if !self.enabled {
            return false;
        }
        match self.last_toggle_ms {
            None => {
                self.last_toggle_ms = Some(now_ms);
                false
            }
            Some(last) if now_ms.saturating_sub(last) >= self.period_ms => {
                self.last_toggle_ms = Some(now_ms);
                true
            }
            Some(_) => false,
        }
    }
}
