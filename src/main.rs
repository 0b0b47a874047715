//! PedCross Firmware: Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HalOutput ×5    HalInput      PwmBuzzer    SystemClock        │
//! │  (lamps)         (button)      (LEDC tone)  (Clock)            │
//! │  LogEventSink (EventSink)                                      │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              Controller (pure logic)                   │    │
//! │  │  FSM · TrafficLights · PedestrianSignals               │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::time::Duration;

use anyhow::Result;
use esp_idf_hal::gpio::{AnyOutputPin, Output, OutputPin, Pin, PinDriver, Pull};
use esp_idf_hal::ledc::{LedcDriver, LedcTimerDriver, config::TimerConfig};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::prelude::*;
use log::info;

use pedcross::adapters::hal_pins::{HalInput, HalOutput, PwmBuzzer};
use pedcross::adapters::log_sink::LogEventSink;
use pedcross::adapters::time::SystemClock;
use pedcross::app::controller::Controller;
use pedcross::app::ports::Clock;
use pedcross::config::SystemConfig;
use pedcross::drivers::pedestrian::PedestrianSignals;
use pedcross::drivers::traffic::TrafficLights;
use pedcross::error::Error;
use pedcross::pins;

type Lamp = HalOutput<PinDriver<'static, AnyOutputPin, Output>>;

/// Bind one lamp, checking the board wiring table.
fn lamp(pin: impl OutputPin, expected_gpio: i32, name: &'static str) -> Result<Lamp> {
    let pin = pin.downgrade_output();
    if pin.pin() != expected_gpio {
        return Err(Error::Init("lamp pin does not match board wiring").into());
    }
    Ok(HalOutput::new(PinDriver::output(pin)?, name))
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  PedCross v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = SystemConfig::default();
    config.validate()?;
    info!(
        "Config: poll={}ms telemetry={}s buzzer={}Hz@{}%",
        config.poll_interval_ms,
        config.telemetry_interval_secs,
        config.buzzer_tone_hz,
        config.buzzer_duty_percent
    );

    // ── 3. Peripherals ────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let p = peripherals.pins;

    let traffic = TrafficLights::new(
        lamp(p.gpio4, pins::TRAFFIC_RED_GPIO, "traffic.red")?,
        lamp(p.gpio5, pins::TRAFFIC_AMBER_GPIO, "traffic.amber")?,
        lamp(p.gpio6, pins::TRAFFIC_GREEN_GPIO, "traffic.green")?,
    );

    let mut button = PinDriver::input(p.gpio16)?;
    button.set_pull(Pull::Up)?;

    let buzzer_timer = LedcTimerDriver::new(
        peripherals.ledc.timer0,
        &TimerConfig::new().frequency(config.buzzer_tone_hz.Hz()),
    )?;
    let buzzer_channel = LedcDriver::new(peripherals.ledc.channel0, &buzzer_timer, p.gpio7)?;
    info!(
        "Pins: button=GPIO{} buzzer=GPIO{}",
        pins::BUTTON_GPIO,
        pins::BUZZER_GPIO
    );

    let pedestrian = PedestrianSignals::new(
        lamp(p.gpio11, pins::PEDESTRIAN_RED_GPIO, "ped.red")?,
        lamp(p.gpio12, pins::PEDESTRIAN_GREEN_GPIO, "ped.green")?,
        HalInput::active_low(button),
        PwmBuzzer::new(buzzer_channel, config.buzzer_duty_percent),
    );

    // ── 4. Controller ─────────────────────────────────────────
    let clock = SystemClock::new();
    let mut sink = LogEventSink::new();
    let mut controller = Controller::new(traffic, pedestrian, clock.now_ms());
    controller.start(&mut sink);

    info!("System ready. Entering poll loop.");

    // ── 5. Poll loop ──────────────────────────────────────────
    let poll = Duration::from_millis(u64::from(config.poll_interval_ms));
    let telemetry_every = config.telemetry_interval_ms();
    let mut last_telemetry = clock.now_ms();

    loop {
        let now = clock.now_ms();
        controller.update(now, &mut sink);

        if telemetry_every > 0 && now.saturating_sub(last_telemetry) >= telemetry_every {
            controller.emit_telemetry(now, &mut sink);
            last_telemetry = now;
        }

        std::thread::sleep(poll);
    }
}
