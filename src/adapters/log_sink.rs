//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(s) => {
                info!(
                    "TELEM | state={} +{}ms | traffic={:?} ped={:?} | buzzer={} | \
                     request={} | cycles={}",
                    s.state.name(),
                    s.elapsed_ms,
                    s.traffic,
                    s.pedestrian,
                    if s.buzzer_active { "on" } else { "off" },
                    if s.request_pending { "pending" } else { "clear" },
                    s.cycles_completed,
                );
            }
            AppEvent::StateChanged { from, to, at_ms } => {
                info!("STATE | {} -> {} @{}ms", from.name(), to.name(), at_ms);
            }
            AppEvent::RequestAccepted { at_ms } => {
                info!("BUTTON | request accepted @{}ms", at_ms);
            }
            AppEvent::RequestAcknowledged => {
                info!("BUTTON | request served");
            }
            AppEvent::FaultEntered(e) => {
                warn!("FAULT | {}", e);
            }
            AppEvent::ResetFromFault => {
                info!("FAULT | cleared by reset");
            }
            AppEvent::Started(state) => {
                info!("START | initial_state={}", state.name());
            }
        }
    }
}
