//! GPIO / peripheral pin assignments for the crossing controller board.
//!
//! Single source of truth: `main` references this module rather than
//! hard-coding pin numbers.  The numbers are documentation for the board
//! wiring; `main` binds the matching `esp-idf-hal` pin objects.

// ---------------------------------------------------------------------------
// Vehicle signal head (active HIGH, 330 Ω series resistors)
// ---------------------------------------------------------------------------

pub const TRAFFIC_RED_GPIO: i32 = 4;
pub const TRAFFIC_AMBER_GPIO: i32 = 5;
pub const TRAFFIC_GREEN_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// Pedestrian signal head (active HIGH)
// ---------------------------------------------------------------------------

/// "Don't walk" (steady) / warning (flashing).
pub const PEDESTRIAN_RED_GPIO: i32 = 11;
/// "Walk".
pub const PEDESTRIAN_GREEN_GPIO: i32 = 12;

// ---------------------------------------------------------------------------
// Crossing-request button (active-low with internal pull-up)
// ---------------------------------------------------------------------------

pub const BUTTON_GPIO: i32 = 16;

// ---------------------------------------------------------------------------
// Piezo buzzer (LEDC PWM)
// ---------------------------------------------------------------------------

pub const BUZZER_GPIO: i32 = 7;
