//! Monitor service — the hexagonal core.
//!
//! [`Monitor`] owns the shared accounting state and the three components
//! that act on it.  It exposes one entry point per lane plus the read-only
//! query surface.  All I/O flows through port traits injected at call
//! sites, making the entire service testable with mock adapters.
//!
//! ```text
//!  SensorReader ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                   │           Monitor            │
//!   AlarmOutput ◀── │ Sampler · Accountant · Reset │
//!                   └──────────────────────────────┘
//! ```
//!
//! `Monitor` is `Sync`: the tick lane and the reset lane may run on
//! different worker contexts and share it by reference.

use log::{error, info, warn};

use crate::accounting::{
    Accountant, AccountingSnapshot, Evaluation, MonitorState, ResetController, Sampler, Zone,
};
use crate::config::MonitorConfig;
use crate::diagnostics::{MetricCounters, RuntimeMetrics};
use crate::error::{Error, Result};

use super::events::MonitorEvent;
use super::ports::{AlarmOutput, EventSink, SensorReader};

// ───────────────────────────────────────────────────────────────
// Monitor
// ───────────────────────────────────────────────────────────────

pub struct Monitor {
    config: MonitorConfig,
    state: MonitorState,
    sampler: Sampler,
    accountant: Accountant,
    reset: ResetController,
    counters: MetricCounters,
}

impl Monitor {
    /// Validate the configuration and build the initial state.
    ///
    /// An invalid configuration is fatal: the monitor refuses to exist.
    pub fn new(config: MonitorConfig) -> Result<Self> {
        if let Err(e) = config.validate() {
            error!("Monitor: refusing to start: {e}");
            return Err(e);
        }
        Ok(Self {
            state: MonitorState::new(&config),
            sampler: Sampler::new(&config),
            accountant: Accountant::new(&config),
            reset: ResetController::new(),
            counters: MetricCounters::new(),
            config,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&self, sink: &mut impl EventSink) {
        sink.emit(&MonitorEvent::Started {
            targets: self.config.targets(),
            evaluation_period_secs: self.config.evaluation_period_secs(),
        });
        info!(
            "Monitor started: fridge<={:.1}°C freezer<={:.1}°C, evaluating every {}s",
            self.config.fridge_target_c,
            self.config.freezer_target_c,
            self.config.evaluation_period_secs()
        );
    }

    // ── Tick lane ─────────────────────────────────────────────

    /// Run one tick: sample both zones, fold, and evaluate when due.
    ///
    /// The `hw` parameter satisfies **both** [`SensorReader`] and
    /// [`AlarmOutput`] — one adapter owns the sensors and the indicator.
    ///
    /// Returns the evaluation when this tick completed a period.  A lock
    /// timeout abandons the tick with nothing changed.
    pub fn on_tick(
        &self,
        hw: &mut (impl SensorReader + AlarmOutput),
        sink: &mut impl EventSink,
    ) -> Result<Option<Evaluation>> {
        let readings = self.sampler.read_zones(hw);
        for zone in Zone::ALL {
            if let Err(error) = readings[zone] {
                warn!("{zone}: sample skipped ({error})");
                self.counters.record_sensor_failure(zone);
                sink.emit(&MonitorEvent::SampleSkipped { zone, error });
            }
        }

        let report = match self.sampler.apply(&self.state, &self.accountant, readings, hw) {
            Ok(report) => report,
            Err(e) => return Err(self.abandoned(e, sink)),
        };
        self.counters.record_tick();

        if let Some(eval) = report.evaluation {
            self.counters.record_evaluation();
            sink.emit(&MonitorEvent::Evaluated(eval));
        }
        Ok(report.evaluation)
    }

    // ── Reset lane ────────────────────────────────────────────

    /// Acknowledge: clear accruals, restart the window, clear the alarm.
    pub fn on_reset(&self, alarm: &mut impl AlarmOutput, sink: &mut impl EventSink) -> Result<()> {
        match self.reset.run(&self.state, alarm) {
            Ok(cleared_secs) => {
                self.counters.record_reset();
                info!(
                    "Reset: cleared fridge={}s freezer={}s",
                    cleared_secs.fridge, cleared_secs.freezer
                );
                sink.emit(&MonitorEvent::AccrualReset { cleared_secs });
                Ok(())
            }
            Err(e) => Err(self.abandoned(e, sink)),
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn fridge_average(&self) -> Result<f64> {
        self.average(Zone::Fridge)
    }

    pub fn freezer_average(&self) -> Result<f64> {
        self.average(Zone::Freezer)
    }

    pub fn fridge_accrued_secs(&self) -> Result<u64> {
        self.accrued_secs(Zone::Fridge)
    }

    pub fn freezer_accrued_secs(&self) -> Result<u64> {
        self.accrued_secs(Zone::Freezer)
    }

    /// Current running average for `zone` (°C).
    pub fn average(&self, zone: Zone) -> Result<f64> {
        Ok(self.state.snapshot()?.averages[zone])
    }

    /// Over-temperature seconds accrued by `zone` since the last reset.
    pub fn accrued_secs(&self, zone: Zone) -> Result<u64> {
        Ok(self.state.snapshot()?.accrued_secs[zone])
    }

    /// Every accounting field, taken under one lock.
    pub fn snapshot(&self) -> Result<AccountingSnapshot> {
        self.state.snapshot()
    }

    pub fn metrics(&self) -> RuntimeMetrics {
        self.counters.collect()
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    // ── Internal ──────────────────────────────────────────────

    fn abandoned(&self, e: Error, sink: &mut impl EventSink) -> Error {
        if let Error::LockTimeout(operation) = e {
            error!("Monitor: {operation} abandoned, guard not acquired within {}ms", self.config.lock_timeout_ms);
            self.counters.record_lock_timeout();
            sink.emit(&MonitorEvent::LockTimedOut { operation });
        }
        e
    }
}
