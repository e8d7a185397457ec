//! System configuration parameters
//!
//! All tunable parameters for the coldwatch monitor.  Values are fixed at
//! startup; nothing here is discovered at runtime.  [`MonitorConfig::validate`]
//! runs before any state is built so a bad value refuses to start instead of
//! dividing by zero later.

use serde::{Deserialize, Serialize};

use crate::accounting::{PerZone, Zone};
use crate::error::{Error, Result};

/// Core system configuration.  Fields missing from a serialized config take
/// their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    // --- Targets ---
    /// Fridge target temperature (°C).  Average strictly above this accrues.
    pub fridge_target_c: f64,
    /// Freezer target temperature (°C).
    pub freezer_target_c: f64,

    // --- Timing ---
    /// Clock tick period (whole seconds).
    pub tick_period_secs: u16,
    /// Ticks between threshold evaluations.  Also the smoothing constant of
    /// the running average.
    pub evaluation_period_ticks: u32,
    /// Upper bound on waiting for the accounting guard (milliseconds).
    pub lock_timeout_ms: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            fridge_target_c: 4.0,
            freezer_target_c: 0.0,

            tick_period_secs: 1,
            evaluation_period_ticks: 300, // 5 min at 1 Hz
            lock_timeout_ms: 100,
        }
    }
}

impl MonitorConfig {
    /// Target temperature for `zone`.
    pub fn target(&self, zone: Zone) -> f64 {
        match zone {
            Zone::Fridge => self.fridge_target_c,
            Zone::Freezer => self.freezer_target_c,
        }
    }

    pub fn targets(&self) -> PerZone<f64> {
        PerZone::from_fn(|zone| self.target(zone))
    }

    /// Real time covered by one evaluation period, in seconds.
    pub fn evaluation_period_secs(&self) -> u64 {
        u64::from(self.evaluation_period_ticks) * u64::from(self.tick_period_secs)
    }

    /// Reject every value the accounting engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.evaluation_period_ticks == 0 {
            return Err(Error::Config("evaluation_period_ticks must be >= 1"));
        }
        if self.tick_period_secs == 0 {
            return Err(Error::Config("tick_period_secs must be >= 1"));
        }
        if !self.fridge_target_c.is_finite() || self.fridge_target_c < 0.0 {
            return Err(Error::Config("fridge_target_c must be a finite value >= 0.0"));
        }
        if !self.freezer_target_c.is_finite() || self.freezer_target_c < 0.0 {
            return Err(Error::Config("freezer_target_c must be a finite value >= 0.0"));
        }
        if self.lock_timeout_ms == 0 {
            return Err(Error::Config("lock_timeout_ms must be >= 1"));
        }
        if u64::from(self.lock_timeout_ms) >= u64::from(self.tick_period_secs) * 1000 {
            return Err(Error::Config("lock_timeout_ms must be shorter than one tick"));
        }
        Ok(())
    }
}
