//! Signal-head drivers and the timing primitives they share.

pub mod buzzer;
pub mod debounce;
pub mod pedestrian;
pub mod periodic;
pub mod traffic;
