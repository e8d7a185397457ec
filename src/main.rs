//! coldwatch firmware — main entry point.
//!
//! Hexagonal architecture with interrupt-driven deferred work.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter (SensorReader + AlarmOutput)   LogEventSink   │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │                Monitor (pure logic)                    │    │
//! │  │  Sampler · Accountant · ResetController                │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  tick esp_timer ─▶ TICK_LANE ─┐                                │
//! │  button ISR ┄▶ RESET_LANE ────┴─▶ worker (LocalExecutor)       │
//! │  forward esp_timer ─▶ ┘                                        │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use log::info;

use coldwatch::adapters::hardware::BoardAdapter;
use coldwatch::adapters::log_sink::LogEventSink;
use coldwatch::app::service::Monitor;
use coldwatch::config::MonitorConfig;
use coldwatch::drivers::{hw_init, hw_timer};
use coldwatch::lanes::{RESET_LANE, TICK_LANE};
use coldwatch::worker;

fn main() -> Result<()> {
    // ── 1. Bootstrap + logging ────────────────────────────────
    #[cfg(target_os = "espidf")]
    {
        esp_idf_svc::sys::link_patches();
        esp_idf_logger::init()?;
    }
    #[cfg(not(target_os = "espidf"))]
    init_host_logging();

    info!("╔══════════════════════════════════════╗");
    info!("║  coldwatch v{}                    ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = load_config()?;
    let monitor = Monitor::new(config).context("configuration rejected")?;

    // ── 3. Peripherals ────────────────────────────────────────
    hw_init::init_peripherals().context("peripheral init")?;
    hw_init::init_isr_service().context("button ISR")?;
    let hw = BoardAdapter::board();
    let mut sink = LogEventSink::new();

    // ── 4. Start ──────────────────────────────────────────────
    monitor.start(&mut sink);
    hw_timer::start_tick_timer(monitor.config().tick_period_secs).context("tick timer")?;
    hw_timer::start_forward_timer().context("button forward timer")?;

    #[cfg(not(target_os = "espidf"))]
    sim::spawn(monitor.config().tick_period_secs);

    info!("System ready. Entering worker loop.");
    worker::run(&TICK_LANE, &RESET_LANE, &monitor, hw, sink)
}

#[cfg(not(target_os = "espidf"))]
fn init_host_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coldwatch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Defaults on the board; on the host an optional JSON file given as the
/// first argument overrides them.
#[cfg(target_os = "espidf")]
fn load_config() -> Result<MonitorConfig> {
    Ok(MonitorConfig::default())
}

#[cfg(not(target_os = "espidf"))]
fn load_config() -> Result<MonitorConfig> {
    let Some(path) = std::env::args().nth(1) else {
        info!("Config: defaults");
        return Ok(MonitorConfig::default());
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let config = serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
    info!("Config loaded from {}", path);
    Ok(config)
}

/// Host simulation: drives the ADC stubs and the button.
///
/// The fridge sits at 3 °C with a door-open excursion to 9 °C for 90 s out
/// of every 240 s; the freezer holds −18 °C.  The button is pressed every
/// 15 minutes.
#[cfg(not(target_os = "espidf"))]
mod sim {
    use std::time::{Duration, Instant};

    use coldwatch::drivers::button::button_isr_handler;
    use coldwatch::pins;
    use coldwatch::sensors::ntc::sim_set_celsius;

    const DOOR_CYCLE_SECS: u64 = 240;
    const DOOR_OPEN_SECS: u64 = 90;
    const BUTTON_EVERY_SECS: u64 = 900;

    pub fn spawn(tick_period_secs: u16) {
        let step = Duration::from_secs(u64::from(tick_period_secs));
        let spawned = std::thread::Builder::new()
            .name("sim".into())
            .spawn(move || {
                let boot = Instant::now();
                let press_every = Duration::from_secs(BUTTON_EVERY_SECS);
                let mut next_press = boot + press_every;
                sim_set_celsius(pins::FREEZER_TEMP_ADC_CHANNEL, -18.0);
                loop {
                    let secs = boot.elapsed().as_secs();
                    let fridge = if secs % DOOR_CYCLE_SECS < DOOR_OPEN_SECS { 9.0 } else { 3.0 };
                    sim_set_celsius(pins::FRIDGE_TEMP_ADC_CHANNEL, fridge);

                    let now = Instant::now();
                    if now >= next_press {
                        log::info!("sim: button press");
                        button_isr_handler(now.duration_since(boot).as_millis() as u32);
                        next_press = next_press_after(next_press, now, press_every);
                    }
                    std::thread::sleep(step);
                }
            });
        if let Err(e) = spawned {
            log::warn!("sim: thread spawn failed ({e}), probes stay at midscale");
        }
    }

    /// First deadline after `now` on the fixed press schedule.  Presses
    /// missed while the thread overslept are dropped, not replayed.
    fn next_press_after(due: Instant, now: Instant, every: Duration) -> Instant {
        let mut next = due + every;
        while next <= now {
            next += every;
        }
        next
    }

}
