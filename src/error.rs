//! Unified error types for the coldwatch firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! worker lanes' error handling uniform.  All variants are `Copy` so they
//! can be passed through events and logs without allocation.
//!
//! None of these errors ever reach the sensor or indicator collaborators:
//! the monitor recovers internally (skip the zone, abandon the tick, or
//! refuse to start).

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The accounting guard was not acquired within the configured bound.
    /// Carries the name of the abandoned operation.
    LockTimeout(&'static str),
    /// Configuration is invalid; the monitor refuses to start.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LockTimeout(op) => write!(f, "lock timeout during {op}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

/// Per-zone read failure.  Handled inside the sampler (the zone is skipped
/// for that tick), so it never becomes an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// Device has not finished initialising or was never found.
    NotReady,
    /// ADC / bus read returned an error or timed out.
    ReadFailed,
    /// Reading is outside the physically plausible range.
    OutOfRange,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotReady => write!(f, "device not ready"),
            Self::ReadFailed => write!(f, "read failed"),
            Self::OutOfRange => write!(f, "reading out of range"),
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
