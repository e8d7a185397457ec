//! Sensor subsystem — per-zone probes and the aggregating [`ZoneSensors`].
//!
//! [`ZoneSensors`] owns one probe per zone and implements the
//! [`SensorReader`] port.  Every reading passes a plausibility gate: a
//! non-finite or physically impossible value for a refrigerated space is a
//! failed read, never a sample.

pub mod ntc;

use core::ops::RangeInclusive;

use crate::accounting::{PerZone, Zone};
use crate::app::ports::SensorReader;
use crate::error::SensorError;

/// Anything outside this band (°C) is a wiring or probe fault.
pub const PLAUSIBLE_RANGE_C: RangeInclusive<f64> = -60.0..=60.0;

/// A single temperature probe.
pub trait Probe {
    /// One reading in °C.
    fn sample(&mut self) -> Result<f64, SensorError>;
}

/// Both zone probes behind the [`SensorReader`] port.
pub struct ZoneSensors<P> {
    probes: PerZone<P>,
}

impl<P: Probe> ZoneSensors<P> {
    pub fn new(fridge: P, freezer: P) -> Self {
        Self {
            probes: PerZone::new(fridge, freezer),
        }
    }
}

impl<P: Probe> SensorReader for ZoneSensors<P> {
    fn read(&mut self, zone: Zone) -> Result<f64, SensorError> {
        let celsius = self.probes[zone].sample()?;
        if !celsius.is_finite() || !PLAUSIBLE_RANGE_C.contains(&celsius) {
            return Err(SensorError::OutOfRange);
        }
        Ok(celsius)
    }
}
