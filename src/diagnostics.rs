//! Runtime diagnostics.
//!
//! Lock-free counters bumped by the worker lanes, collected on demand into
//! a [`RuntimeMetrics`] snapshot for the log line or a display.  Counters
//! live for the process lifetime; nothing here is persisted.

use core::sync::atomic::{AtomicU64, Ordering};

use crate::accounting::{PerZone, Zone};
use crate::lanes::WorkLane;

/// Live counters.  Written from the lanes, read from anywhere.
#[derive(Default)]
pub struct MetricCounters {
    ticks: AtomicU64,
    evaluations: AtomicU64,
    resets: AtomicU64,
    sensor_failures: PerZone<AtomicU64>,
    lock_timeouts: AtomicU64,
}

impl MetricCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_tick(&self) {
        self.ticks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_evaluation(&self) {
        self.evaluations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_reset(&self) {
        self.resets.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_sensor_failure(&self, zone: Zone) {
        self.sensor_failures[zone].fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_lock_timeout(&self) {
        self.lock_timeouts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn collect(&self) -> RuntimeMetrics {
        RuntimeMetrics {
            ticks: self.ticks.load(Ordering::Relaxed),
            evaluations: self.evaluations.load(Ordering::Relaxed),
            resets: self.resets.load(Ordering::Relaxed),
            sensor_failures: PerZone::from_fn(|zone| self.sensor_failures[zone].load(Ordering::Relaxed)),
            lock_timeouts: self.lock_timeouts.load(Ordering::Relaxed),
            coalesced_ticks: 0,
            coalesced_resets: 0,
        }
    }
}

/// Runtime diagnostics snapshot collected on-demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RuntimeMetrics {
    /// Ticks that ran to completion.
    pub ticks: u64,
    pub evaluations: u64,
    pub resets: u64,
    pub sensor_failures: PerZone<u64>,
    /// Ticks or resets abandoned because the guard timed out.
    pub lock_timeouts: u64,
    /// Timer fires folded into an outstanding tick task.
    pub coalesced_ticks: u32,
    /// Button presses folded into an outstanding reset task.
    pub coalesced_resets: u32,
}

impl RuntimeMetrics {
    /// Fill in the coalescing counters kept by the lanes themselves.
    pub fn with_lanes(mut self, tick: &WorkLane, reset: &WorkLane) -> Self {
        self.coalesced_ticks = tick.coalesced();
        self.coalesced_resets = reset.coalesced();
        self
    }
}
