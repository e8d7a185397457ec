//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing each monitor event to the logger
//! (UART / USB-CDC on the board, stderr in simulation).  The evaluation
//! line carries the same figures a front-panel display would show.

use log::{info, warn};

use crate::app::events::MonitorEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`MonitorEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &MonitorEvent) {
        match event {
            MonitorEvent::Started { targets, evaluation_period_secs } => {
                info!(
                    "START | fridge<={:.1}\u{00b0}C freezer<={:.1}\u{00b0}C | period={}s",
                    targets.fridge, targets.freezer, evaluation_period_secs
                );
            }
            MonitorEvent::Evaluated(e) => {
                info!(
                    "EVAL  | fridge avg={:.2}\u{00b0}C over={}s | freezer avg={:.2}\u{00b0}C over={}s | alarm={}",
                    e.averages.fridge,
                    e.accrued_secs.fridge,
                    e.averages.freezer,
                    e.accrued_secs.freezer,
                    if e.alarm { "ON" } else { "off" },
                );
            }
            MonitorEvent::AccrualReset { cleared_secs } => {
                info!(
                    "RESET | cleared fridge={}s freezer={}s",
                    cleared_secs.fridge, cleared_secs.freezer
                );
            }
            MonitorEvent::SampleSkipped { zone, error } => {
                warn!("SKIP  | {} | {}", zone, error);
            }
            MonitorEvent::LockTimedOut { operation } => {
                warn!("LOCK  | {} abandoned", operation);
            }
        }
    }
}
