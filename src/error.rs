//! Unified error types for the crossing firmware.
//!
//! Every fallible operation in the library funnels into [`Error`].  All
//! variants are `Copy` so they can be carried through the controller and
//! emitted as events without allocation.
//!
//! Device writes never show up here: the port traits treat them as
//! infallible, and the hardware adapters log a failed write instead.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A raw state value outside the five defined crossing states.
    InvalidState(u8),
    /// A known state that may only be entered through the nominal sequence.
    StateRefused(u8),
    /// Configuration is invalid.
    Config(&'static str),
    /// Peripheral initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidState(raw) => write!(f, "invalid state: {raw}"),
            Self::StateRefused(raw) => write!(f, "state {raw} cannot be loaded directly"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
