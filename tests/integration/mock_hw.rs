//! Mock adapters for integration tests.
//!
//! `MockHardware` serves scripted zone temperatures and records every
//! alarm write so tests can assert on the full indicator history without
//! touching real ADC/GPIO registers.

use std::sync::mpsc::Sender;

use coldwatch::accounting::{Evaluation, PerZone, Zone};
use coldwatch::app::events::MonitorEvent;
use coldwatch::app::ports::{AlarmOutput, EventSink, SensorReader};
use coldwatch::error::SensorError;

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub temps: PerZone<Result<f64, SensorError>>,
    pub alarm_writes: Vec<bool>,
    pub reads: usize,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new(fridge_c: f64, freezer_c: f64) -> Self {
        Self {
            temps: PerZone::new(Ok(fridge_c), Ok(freezer_c)),
            alarm_writes: Vec::new(),
            reads: 0,
        }
    }

    pub fn set_reading(&mut self, zone: Zone, reading: Result<f64, SensorError>) {
        self.temps[zone] = reading;
    }

    /// Indicator level after the last write; off if never written.
    pub fn alarm_on(&self) -> bool {
        self.alarm_writes.last().copied().unwrap_or(false)
    }
}

impl SensorReader for MockHardware {
    fn read(&mut self, zone: Zone) -> Result<f64, SensorError> {
        self.reads += 1;
        self.temps[zone]
    }
}

impl AlarmOutput for MockHardware {
    fn set(&mut self, on: bool) {
        self.alarm_writes.push(on);
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<MonitorEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn evaluations(&self) -> Vec<Evaluation> {
        self.events
            .iter()
            .filter_map(|e| match e {
                MonitorEvent::Evaluated(eval) => Some(*eval),
                _ => None,
            })
            .collect()
    }

    pub fn skipped(&self, zone: Zone) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, MonitorEvent::SampleSkipped { zone: z, .. } if *z == zone))
            .count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &MonitorEvent) {
        self.events.push(event.clone());
    }
}

// ── ChannelSink ───────────────────────────────────────────────

/// Forwards every event to another thread, for tests where the worker runs
/// on its own thread and never returns.
pub struct ChannelSink(pub Sender<MonitorEvent>);

impl EventSink for ChannelSink {
    fn emit(&mut self, event: &MonitorEvent) {
        let _ = self.0.send(event.clone());
    }
}
