//! Per-tick sampler.
//!
//! Reads both zone sensors, folds every valid reading into that zone's
//! exponential moving average, and advances the shared evaluation counter.
//! When the counter reaches the evaluation period it is zeroed and the
//! [`Accountant`] runs in the same critical section.
//!
//! Sensor I/O happens before the guard is taken, so the lock is held only
//! for a few floating-point operations.  A failed read leaves that zone's
//! average untouched; the counter and the other zone carry on.

use super::accountant::{Accountant, Evaluation};
use super::state::MonitorState;
use super::zone::{PerZone, Zone};
use crate::app::ports::{AlarmOutput, SensorReader};
use crate::config::MonitorConfig;
use crate::error::{Result, SensorError};

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// Per-zone reading: the folded sample, or why it was skipped.
    pub readings: PerZone<core::result::Result<f64, SensorError>>,
    /// Present when this tick completed an evaluation period.
    pub evaluation: Option<Evaluation>,
}

pub struct Sampler {
    /// Smoothing constant `P` as a float.  Never below 1.0.
    period: f64,
    period_ticks: u32,
}

impl Sampler {
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            period: f64::from(config.evaluation_period_ticks),
            period_ticks: config.evaluation_period_ticks,
        }
    }

    /// `(average * (P - 1) + sample) / P`
    pub fn fold(&self, average: f64, sample: f64) -> f64 {
        (average * (self.period - 1.0) + sample) / self.period
    }

    /// Run one tick.  Fails only when the guard could not be acquired, in
    /// which case nothing was changed.
    pub fn run(
        &self,
        state: &MonitorState,
        accountant: &Accountant,
        sensors: &mut impl SensorReader,
        alarm: &mut impl AlarmOutput,
    ) -> Result<TickReport> {
        let readings = self.read_zones(sensors);
        self.apply(state, accountant, readings, alarm)
    }

    /// Sensor half of a tick.  Runs outside the guard.
    pub fn read_zones(&self, sensors: &mut impl SensorReader) -> PerZone<core::result::Result<f64, SensorError>> {
        PerZone::from_fn(|zone| sensors.read(zone))
    }

    /// Accounting half of a tick: fold the valid readings, advance the
    /// counter, and evaluate when the period completes.
    pub fn apply(
        &self,
        state: &MonitorState,
        accountant: &Accountant,
        readings: PerZone<core::result::Result<f64, SensorError>>,
        alarm: &mut impl AlarmOutput,
    ) -> Result<TickReport> {
        let mut accounts = state.lock("tick")?;
        for zone in Zone::ALL {
            if let Ok(sample) = readings[zone] {
                accounts.averages[zone] = self.fold(accounts.averages[zone], sample);
            }
        }

        accounts.ticks_since_evaluation += 1;
        let evaluation = if accounts.ticks_since_evaluation >= self.period_ticks {
            accounts.ticks_since_evaluation = 0;
            Some(accountant.evaluate(&mut accounts, alarm))
        } else {
            None
        };

        Ok(TickReport { readings, evaluation })
    }
}
