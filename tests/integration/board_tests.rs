//! Board adapter tests against the simulated ADC.
//!
//! Exercises the full hardware path on the host: simulated ADC counts →
//! NTC conversion → plausibility gate → Monitor, with the alarm LED on a
//! raw GPIO stub.

use coldwatch::accounting::{PerZone, Zone};
use coldwatch::adapters::hardware::BoardAdapter;
use coldwatch::adapters::log_sink::LogEventSink;
use coldwatch::app::events::MonitorEvent;
use coldwatch::app::ports::{EventSink, SensorReader};
use coldwatch::app::service::Monitor;
use coldwatch::config::MonitorConfig;
use coldwatch::error::SensorError;
use coldwatch::pins;
use coldwatch::sensors::ntc::{sim_set_celsius, sim_set_raw};

use super::mock_hw::RecordingSink;

#[test]
fn board_reads_both_probes_and_lights_the_led() {
    sim_set_celsius(pins::FRIDGE_TEMP_ADC_CHANNEL, 9.0);
    sim_set_celsius(pins::FREEZER_TEMP_ADC_CHANNEL, -18.0);

    let mut hw = BoardAdapter::board();
    let fridge = hw.read(Zone::Fridge).unwrap();
    let freezer = hw.read(Zone::Freezer).unwrap();
    assert!((fridge - 9.0).abs() < 0.2, "fridge read {fridge}");
    assert!((freezer + 18.0).abs() < 0.2, "freezer read {freezer}");

    let monitor = Monitor::new(MonitorConfig {
        evaluation_period_ticks: 1,
        ..MonitorConfig::default()
    })
    .unwrap();
    let mut sink = RecordingSink::new();
    let eval = monitor.on_tick(&mut hw, &mut sink).unwrap().unwrap();
    assert!(eval.over.fridge && !eval.over.freezer);
    assert!(hw.alarm_lit());

    // An open probe pins the ADC to the rail and is skipped, not folded.
    sim_set_raw(pins::FRIDGE_TEMP_ADC_CHANNEL, 4095);
    assert_eq!(hw.read(Zone::Fridge), Err(SensorError::OutOfRange));

    monitor.on_reset(&mut hw, &mut sink).unwrap();
    assert!(!hw.alarm_lit());
}

#[test]
fn log_sink_renders_every_event() {
    let mut sink = LogEventSink::new();
    let monitor = Monitor::new(MonitorConfig::default()).unwrap();
    monitor.start(&mut sink);
    sink.emit(&MonitorEvent::SampleSkipped {
        zone: Zone::Freezer,
        error: SensorError::ReadFailed,
    });
    sink.emit(&MonitorEvent::AccrualReset {
        cleared_secs: PerZone::new(300, 0),
    });
    sink.emit(&MonitorEvent::LockTimedOut { operation: "tick" });
}
