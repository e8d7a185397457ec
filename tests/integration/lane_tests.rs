//! Integration tests for the deferred-work lanes and the worker entry points.
//!
//! Each test builds its own lanes so nothing here races the global
//! `TICK_LANE` / `RESET_LANE`.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc;
use std::time::Duration;

use coldwatch::accounting::Zone;
use coldwatch::app::events::MonitorEvent;
use coldwatch::app::ports::{AlarmOutput, SensorReader};
use coldwatch::app::service::Monitor;
use coldwatch::config::MonitorConfig;
use coldwatch::error::SensorError;
use coldwatch::lanes::WorkLane;
use coldwatch::worker::{self, Shared};
use futures_lite::future::block_on;

use super::mock_hw::{ChannelSink, MockHardware, RecordingSink};

/// Hardware whose fridge read re-fires the timer twice, as if the sampler
/// were slow enough for the next ticks to arrive mid-run.
struct SlowHardware<'a> {
    inner: MockHardware,
    lane: &'a WorkLane,
    refires: Vec<bool>,
}

impl SensorReader for SlowHardware<'_> {
    fn read(&mut self, zone: Zone) -> Result<f64, SensorError> {
        if zone == Zone::Fridge {
            self.refires.push(self.lane.submit());
            self.refires.push(self.lane.submit());
        }
        self.inner.read(zone)
    }
}

impl AlarmOutput for SlowHardware<'_> {
    fn set(&mut self, on: bool) {
        self.inner.set(on);
    }
}

fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

#[test]
fn ticks_fired_during_a_run_do_not_start_a_second_run() {
    let lane = WorkLane::new("tick");
    let monitor = Monitor::new(MonitorConfig::default()).unwrap();
    let hw = shared(SlowHardware {
        inner: MockHardware::new(4.0, 0.0),
        lane: &lane,
        refires: Vec::new(),
    });
    let sink = shared(RecordingSink::new());

    assert!(lane.submit());
    block_on(worker::serve_tick(&lane, &monitor, &hw, &sink)).unwrap();

    assert_eq!(hw.borrow().refires, vec![false, false]);
    assert_eq!(lane.coalesced(), 2);
    assert_eq!(monitor.metrics().ticks, 1, "exactly one sampler run");
    assert!(!lane.is_outstanding(), "lane re-opens once the run completes");
    assert!(lane.try_claim().is_none(), "coalesced ticks left nothing queued");
}

#[test]
fn pending_tick_absorbs_repeat_submissions() {
    let lane = WorkLane::new("tick");
    let monitor = Monitor::new(MonitorConfig::default()).unwrap();
    let hw = shared(MockHardware::new(4.0, 0.0));
    let sink = shared(RecordingSink::new());

    assert!(lane.submit());
    assert!(!lane.submit());
    assert!(!lane.submit());

    block_on(worker::serve_tick(&lane, &monitor, &hw, &sink)).unwrap();
    assert_eq!(monitor.metrics().ticks, 1);
    assert_eq!(hw.borrow().reads, 2, "one read per zone");

    assert!(lane.submit(), "next tick after completion is accepted");
    block_on(worker::serve_tick(&lane, &monitor, &hw, &sink)).unwrap();
    assert_eq!(monitor.metrics().ticks, 2);
}

#[test]
fn reset_lane_clears_through_the_worker() {
    let tick = WorkLane::new("tick");
    let reset = WorkLane::new("reset");
    let monitor = Monitor::new(MonitorConfig {
        evaluation_period_ticks: 1,
        ..MonitorConfig::default()
    })
    .unwrap();
    let hw = shared(MockHardware::new(7.0, 0.0));
    let sink = shared(RecordingSink::new());

    assert!(tick.submit());
    let eval = block_on(worker::serve_tick(&tick, &monitor, &hw, &sink)).unwrap();
    assert!(eval.is_some_and(|e| e.alarm));

    assert!(reset.submit());
    assert!(!reset.submit(), "second press before service coalesces");
    block_on(worker::serve_reset(&reset, &monitor, &hw, &sink)).unwrap();

    assert_eq!(monitor.fridge_accrued_secs().unwrap(), 0);
    assert!(!hw.borrow().alarm_on());
    assert_eq!(monitor.metrics().resets, 1);
    assert_eq!(reset.coalesced(), 1);
}

#[test]
fn lanes_are_independent() {
    let tick = WorkLane::new("tick");
    let reset = WorkLane::new("reset");

    assert!(tick.submit());
    assert!(reset.submit(), "a pending tick never blocks a reset");
    let claim = tick.try_claim().expect("tick pending");
    assert!(reset.is_outstanding());
    drop(claim);
    assert!(!tick.is_outstanding());
    assert!(reset.is_outstanding());
}

#[test]
fn button_interrupt_reaches_a_parked_worker_only_through_the_forwarder() {
    static TICK: WorkLane = WorkLane::new("tick");
    static RESET: WorkLane = WorkLane::new("reset");
    let (tx, rx) = mpsc::channel();

    std::thread::Builder::new()
        .name("worker".into())
        .spawn(move || {
            let monitor = Monitor::new(MonitorConfig::default()).unwrap();
            worker::run(&TICK, &RESET, &monitor, MockHardware::new(4.0, 0.0), ChannelSink(tx));
        })
        .unwrap();
    // Let the worker park inside block_on.
    std::thread::sleep(Duration::from_millis(50));

    assert!(RESET.submit_from_isr());
    assert!(!RESET.submit_from_isr(), "bounce before service coalesces");
    assert!(
        rx.recv_timeout(Duration::from_millis(100)).is_err(),
        "interrupt path must not wake the worker by itself"
    );
    assert!(RESET.is_outstanding());

    assert!(RESET.forward_deferred());
    let event = rx.recv_timeout(Duration::from_secs(5)).expect("reset ran on the worker");
    assert!(matches!(event, MonitorEvent::AccrualReset { .. }));
    assert_eq!(RESET.coalesced(), 1);

    // The claim is dropped right after the reset returns.
    let deadline = std::time::Instant::now() + Duration::from_secs(5);
    while RESET.is_outstanding() && std::time::Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(1));
    }
    assert!(!RESET.is_outstanding());
}
