//! Threshold accountant.
//!
//! Runs once per completed evaluation period, always from inside the
//! sampler's critical section.  Both zones are evaluated on every run; a
//! zone whose average is strictly above its target accrues one full
//! evaluation period of over-temperature time.  The alarm output is then
//! driven to the level "any zone over" — re-asserted or re-cleared every
//! time, never latched.

use super::state::Accounts;
use super::zone::{PerZone, Zone};
use crate::app::ports::AlarmOutput;
use crate::config::MonitorConfig;

/// Result of one evaluation, as seen at the evaluation instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub averages: PerZone<f64>,
    pub over: PerZone<bool>,
    pub accrued_secs: PerZone<u64>,
    pub alarm: bool,
}

pub struct Accountant {
    targets: PerZone<f64>,
    period_secs: u64,
}

impl Accountant {
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            targets: config.targets(),
            period_secs: config.evaluation_period_secs(),
        }
    }

    /// Compare, accrue, and push the alarm level.
    ///
    /// Caller must hold the accounting guard for the whole call.
    pub(crate) fn evaluate(&self, accounts: &mut Accounts, alarm: &mut impl AlarmOutput) -> Evaluation {
        let mut over = PerZone::new(false, false);
        for zone in Zone::ALL {
            if accounts.averages[zone] > self.targets[zone] {
                accounts.accrued_secs[zone] = accounts.accrued_secs[zone].saturating_add(self.period_secs);
                over[zone] = true;
            }
        }

        accounts.alarm = over.fridge || over.freezer;
        alarm.set(accounts.alarm);

        Evaluation {
            averages: accounts.averages,
            over,
            accrued_secs: accounts.accrued_secs,
            alarm: accounts.alarm,
        }
    }
}
