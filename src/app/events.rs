//! Outbound monitor events.
//!
//! The [`Monitor`](super::service::Monitor) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  The stock adapter writes
//! them to the serial log; a display or test harness can record them.

use crate::accounting::{Evaluation, PerZone, Zone};
use crate::error::SensorError;

/// Structured events emitted by the monitor core.
#[derive(Debug, Clone, PartialEq)]
pub enum MonitorEvent {
    /// The monitor is ready to accept ticks.
    Started {
        targets: PerZone<f64>,
        evaluation_period_secs: u64,
    },

    /// A zone's reading was dropped for this tick.
    SampleSkipped { zone: Zone, error: SensorError },

    /// An evaluation period completed.
    Evaluated(Evaluation),

    /// The button acknowledged and cleared the accrued time.
    AccrualReset { cleared_secs: PerZone<u64> },

    /// The accounting guard was not acquired in time; `operation` was
    /// abandoned and will be retried on its next event.
    LockTimedOut { operation: &'static str },
}
