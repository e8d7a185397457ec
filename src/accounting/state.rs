//! Shared accounting state and its single guard.
//!
//! Averages, the evaluation counter, accruals and the alarm level all live
//! behind one mutex.  Every mutation and every multi-field read happens
//! under it, so no reader ever sees accrual updated for one zone but not the
//! other within the same evaluation.
//!
//! Acquisition is bounded: [`MonitorState::lock`] parks for at most the
//! configured timeout and then fails with [`Error::LockTimeout`].  The
//! caller abandons its operation; nothing proceeds unsynchronised.

use std::time::Duration;

use parking_lot::{Mutex, MutexGuard};

use super::zone::PerZone;
use crate::config::MonitorConfig;
use crate::error::{Error, Result};

/// The guarded fields.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Accounts {
    pub(crate) averages: PerZone<f64>,
    pub(crate) accrued_secs: PerZone<u64>,
    pub(crate) ticks_since_evaluation: u32,
    pub(crate) alarm: bool,
}

impl Accounts {
    fn initial(config: &MonitorConfig) -> Self {
        Self {
            averages: config.targets(),
            accrued_secs: PerZone::default(),
            ticks_since_evaluation: 0,
            alarm: false,
        }
    }

    fn snapshot(&self) -> AccountingSnapshot {
        AccountingSnapshot {
            averages: self.averages,
            accrued_secs: self.accrued_secs,
            ticks_since_evaluation: self.ticks_since_evaluation,
            alarm: self.alarm,
        }
    }
}

/// A consistent copy of every accounting field, taken under one lock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccountingSnapshot {
    pub averages: PerZone<f64>,
    pub accrued_secs: PerZone<u64>,
    pub ticks_since_evaluation: u32,
    pub alarm: bool,
}

/// Process-wide accounting state.  Created once at startup.
pub struct MonitorState {
    accounts: Mutex<Accounts>,
    lock_timeout: Duration,
}

impl MonitorState {
    /// Averages start at each zone's target; accruals and counter at zero.
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            accounts: Mutex::new(Accounts::initial(config)),
            lock_timeout: Duration::from_millis(u64::from(config.lock_timeout_ms)),
        }
    }

    /// Acquire the guard within the configured bound.
    ///
    /// `operation` names the caller for the timeout error and log line.
    pub(crate) fn lock(&self, operation: &'static str) -> Result<MutexGuard<'_, Accounts>> {
        self.accounts
            .try_lock_for(self.lock_timeout)
            .ok_or(Error::LockTimeout(operation))
    }

    pub fn snapshot(&self) -> Result<AccountingSnapshot> {
        Ok(self.lock("snapshot")?.snapshot())
    }
}
