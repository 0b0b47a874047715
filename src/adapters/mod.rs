//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements                  | Connects to                 |
//! |------------|-----------------------------|-----------------------------|
//! | `hal_pins` | DigitalOutput, DigitalInput | `embedded-hal` GPIO         |
//! |            | BuzzerOutput                | `embedded-hal` PWM (LEDC)   |
//! | `log_sink` | EventSink                   | Serial log output           |
//! | `time`     | Clock                       | ESP32 system timer          |

pub mod hal_pins;
pub mod log_sink;
pub mod time;
