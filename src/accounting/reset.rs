//! Reset controller — acknowledges accrued over-temperature time.
//!
//! Runs on the reset lane after a debounced button press.  No sensor I/O:
//! zero both accruals, restart the evaluation window, clear the alarm, all
//! under one acquisition of the guard.  Running averages are left alone.

use super::state::MonitorState;
use super::zone::PerZone;
use crate::app::ports::AlarmOutput;
use crate::error::Result;

#[derive(Default)]
pub struct ResetController;

impl ResetController {
    pub fn new() -> Self {
        Self
    }

    /// Returns the accruals that were cleared.
    pub fn run(&self, state: &MonitorState, alarm: &mut impl AlarmOutput) -> Result<PerZone<u64>> {
        let mut accounts = state.lock("reset")?;
        let cleared = accounts.accrued_secs;
        accounts.accrued_secs = PerZone::new(0, 0);
        accounts.ticks_since_evaluation = 0;
        accounts.alarm = false;
        alarm.set(false);
        Ok(cleared)
    }
}
