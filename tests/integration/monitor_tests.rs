//! Integration tests for the Monitor → Sampler → Accountant → alarm pipeline.
//!
//! These run on the host and drive the monitor tick by tick through mock
//! adapters.

use std::sync::Arc;

use coldwatch::accounting::Zone;
use coldwatch::app::events::MonitorEvent;
use coldwatch::app::service::Monitor;
use coldwatch::config::MonitorConfig;
use coldwatch::error::{Error, SensorError};

use super::mock_hw::{MockHardware, RecordingSink};

fn monitor_with_period(ticks: u32) -> Monitor {
    Monitor::new(MonitorConfig {
        evaluation_period_ticks: ticks,
        ..MonitorConfig::default()
    })
    .unwrap()
}

fn run_ticks(monitor: &Monitor, hw: &mut MockHardware, sink: &mut RecordingSink, n: usize) {
    for _ in 0..n {
        monitor.on_tick(hw, sink).unwrap();
    }
}

// ── Accrual ───────────────────────────────────────────────────

#[test]
fn accrues_only_the_periods_that_ended_over_target() {
    let monitor = monitor_with_period(4);
    let mut hw = MockHardware::new(8.0, -18.0);
    let mut sink = RecordingSink::new();

    run_ticks(&monitor, &mut hw, &mut sink, 8);
    hw.set_reading(Zone::Fridge, Ok(-20.0));
    run_ticks(&monitor, &mut hw, &mut sink, 4);

    let evals = sink.evaluations();
    assert_eq!(evals.len(), 3);
    assert!(evals[0].over.fridge && evals[1].over.fridge);
    assert!(!evals[2].over.fridge, "average at tick 12 was {}", evals[2].averages.fridge);

    assert_eq!(monitor.fridge_accrued_secs().unwrap(), 8);
    assert_eq!(monitor.freezer_accrued_secs().unwrap(), 0);
    assert!(!hw.alarm_on(), "alarm follows the latest evaluation");
    assert_eq!(hw.alarm_writes, vec![true, true, false]);
}

#[test]
fn longer_ticks_accrue_more_seconds_per_period() {
    let monitor = Monitor::new(MonitorConfig {
        tick_period_secs: 5,
        evaluation_period_ticks: 2,
        ..MonitorConfig::default()
    })
    .unwrap();
    let mut hw = MockHardware::new(-18.0, 12.0);
    let mut sink = RecordingSink::new();

    run_ticks(&monitor, &mut hw, &mut sink, 2);
    assert_eq!(monitor.freezer_accrued_secs().unwrap(), 10);
}

// ── End to end ────────────────────────────────────────────────

#[test]
fn warm_fridge_for_one_period_then_acknowledge() {
    let monitor = Monitor::new(MonitorConfig::default()).unwrap();
    let mut hw = MockHardware::new(5.0, -18.0);
    let mut sink = RecordingSink::new();
    monitor.start(&mut sink);

    run_ticks(&monitor, &mut hw, &mut sink, 299);
    assert_eq!(monitor.fridge_accrued_secs().unwrap(), 0);
    assert!(hw.alarm_writes.is_empty());

    let eval = monitor.on_tick(&mut hw, &mut sink).unwrap().expect("tick 300 evaluates");
    assert_eq!(eval.accrued_secs.fridge, 300);
    assert_eq!(monitor.fridge_accrued_secs().unwrap(), 300);
    assert!(hw.alarm_on());

    monitor.on_reset(&mut hw, &mut sink).unwrap();
    assert_eq!(monitor.fridge_accrued_secs().unwrap(), 0);
    assert!(!hw.alarm_on());

    let avg = monitor.fridge_average().unwrap();
    assert!(avg > 4.5 && avg < 5.0, "average should stay near the sample, got {avg}");

    assert!(matches!(sink.events.first(), Some(MonitorEvent::Started { .. })));
    assert!(matches!(
        sink.events.last(),
        Some(MonitorEvent::AccrualReset { cleared_secs }) if cleared_secs.fridge == 300
    ));
}

#[test]
fn reset_restarts_the_evaluation_window() {
    let monitor = monitor_with_period(4);
    let mut hw = MockHardware::new(9.0, -18.0);
    let mut sink = RecordingSink::new();

    run_ticks(&monitor, &mut hw, &mut sink, 3);
    monitor.on_reset(&mut hw, &mut sink).unwrap();
    assert_eq!(monitor.snapshot().unwrap().ticks_since_evaluation, 0);

    run_ticks(&monitor, &mut hw, &mut sink, 3);
    assert!(sink.evaluations().is_empty(), "window restarted at the reset");
    run_ticks(&monitor, &mut hw, &mut sink, 1);
    assert_eq!(sink.evaluations().len(), 1);
}

// ── Reset ─────────────────────────────────────────────────────

#[test]
fn reset_with_nothing_accrued_is_harmless() {
    let monitor = monitor_with_period(4);
    let mut hw = MockHardware::new(2.0, -18.0);
    let mut sink = RecordingSink::new();

    monitor.on_reset(&mut hw, &mut sink).unwrap();
    monitor.on_reset(&mut hw, &mut sink).unwrap();

    assert_eq!(monitor.fridge_accrued_secs().unwrap(), 0);
    assert_eq!(monitor.freezer_accrued_secs().unwrap(), 0);
    assert_eq!(hw.alarm_writes, vec![false, false]);
    assert_eq!(monitor.metrics().resets, 2);
}

#[test]
fn reset_does_not_touch_the_averages() {
    let monitor = monitor_with_period(2);
    let mut hw = MockHardware::new(10.0, 3.0);
    let mut sink = RecordingSink::new();

    run_ticks(&monitor, &mut hw, &mut sink, 1);
    let before = monitor.snapshot().unwrap().averages;
    monitor.on_reset(&mut hw, &mut sink).unwrap();
    assert_eq!(monitor.snapshot().unwrap().averages, before);
}

// ── Sensor failures ───────────────────────────────────────────

#[test]
fn failed_fridge_read_leaves_freezer_and_counter_intact() {
    let monitor = monitor_with_period(3);
    let mut hw = MockHardware::new(4.0, 0.0);
    let mut sink = RecordingSink::new();

    hw.set_reading(Zone::Fridge, Err(SensorError::ReadFailed));
    hw.set_reading(Zone::Freezer, Ok(-3.0));
    monitor.on_tick(&mut hw, &mut sink).unwrap();

    let snap = monitor.snapshot().unwrap();
    assert!((snap.averages.fridge - 4.0).abs() < f64::EPSILON);
    assert!((snap.averages.freezer - (-1.0)).abs() < 1e-12);
    assert_eq!(snap.ticks_since_evaluation, 1);
    assert_eq!(sink.skipped(Zone::Fridge), 1);
    assert_eq!(sink.skipped(Zone::Freezer), 0);

    // The period still completes on schedule.
    run_ticks(&monitor, &mut hw, &mut sink, 2);
    assert_eq!(sink.evaluations().len(), 1);
    assert_eq!(monitor.metrics().sensor_failures.fridge, 3);
}

#[test]
fn both_zones_failing_still_advances_the_counter() {
    let monitor = monitor_with_period(2);
    let mut hw = MockHardware::new(4.0, 0.0);
    let mut sink = RecordingSink::new();
    hw.set_reading(Zone::Fridge, Err(SensorError::NotReady));
    hw.set_reading(Zone::Freezer, Err(SensorError::OutOfRange));

    run_ticks(&monitor, &mut hw, &mut sink, 2);

    let evals = sink.evaluations();
    assert_eq!(evals.len(), 1);
    assert_eq!(evals[0].averages.fridge, 4.0);
    assert!(!evals[0].alarm, "averages at target are not over");
}

// ── Shared guard ──────────────────────────────────────────────

#[test]
fn concurrent_ticks_keep_the_counter_consistent() {
    const THREADS: usize = 4;
    const TICKS_EACH: usize = 250;

    let monitor = Arc::new(monitor_with_period(7));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let monitor = Arc::clone(&monitor);
            std::thread::spawn(move || {
                let mut hw = MockHardware::new(6.0, -18.0);
                let mut sink = RecordingSink::new();
                for _ in 0..TICKS_EACH {
                    match monitor.on_tick(&mut hw, &mut sink) {
                        Ok(_) | Err(Error::LockTimeout(_)) => {}
                        Err(e) => panic!("unexpected error: {e}"),
                    }
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let m = monitor.metrics();
    assert_eq!(m.ticks + m.lock_timeouts, (THREADS * TICKS_EACH) as u64);
    assert_eq!(m.evaluations, m.ticks / 7);
    let snap = monitor.snapshot().unwrap();
    assert_eq!(u64::from(snap.ticks_since_evaluation), m.ticks % 7);
    assert_eq!(snap.accrued_secs.fridge, m.evaluations * 7);
}
