//! Hardware adapter — bridges the board peripherals to the domain ports.
//!
//! Owns the [`ZoneSensors`] and the [`AlarmLed`], exposing them through
//! [`SensorReader`] and [`AlarmOutput`] so the tick lane can hand a single
//! `&mut` to [`Monitor::on_tick`](crate::app::service::Monitor::on_tick).
//! On non-espidf targets the underlying drivers use cfg-gated simulation
//! stubs.

use embedded_hal::digital::OutputPin;

use crate::accounting::Zone;
use crate::app::ports::{AlarmOutput, SensorReader};
use crate::drivers::alarm_led::AlarmLed;
use crate::drivers::hw_init::RawOutputPin;
use crate::error::SensorError;
use crate::pins;
use crate::sensors::ntc::{AdcChannel, NtcProbe};
use crate::sensors::{Probe, ZoneSensors};

/// The production board: two NTC probes on ADC1 and a GPIO LED.
pub type BoardAdapter = HardwareAdapter<NtcProbe<AdcChannel>, RawOutputPin>;

pub struct HardwareAdapter<P, L> {
    sensors: ZoneSensors<P>,
    alarm: AlarmLed<L>,
}

impl<P: Probe, L: OutputPin> HardwareAdapter<P, L> {
    pub fn new(sensors: ZoneSensors<P>, alarm: AlarmLed<L>) -> Self {
        Self { sensors, alarm }
    }

    pub fn alarm_lit(&self) -> bool {
        self.alarm.is_lit()
    }
}

impl BoardAdapter {
    /// Wire the adapter to the pins in [`crate::pins`].
    pub fn board() -> Self {
        Self::new(
            ZoneSensors::new(
                NtcProbe::new(AdcChannel::new(pins::FRIDGE_TEMP_ADC_CHANNEL)),
                NtcProbe::new(AdcChannel::new(pins::FREEZER_TEMP_ADC_CHANNEL)),
            ),
            AlarmLed::new(RawOutputPin::new(pins::ALARM_LED_GPIO)),
        )
    }
}

impl<P: Probe, L: OutputPin> SensorReader for HardwareAdapter<P, L> {
    fn read(&mut self, zone: Zone) -> Result<f64, SensorError> {
        self.sensors.read(zone)
    }
}

impl<P: Probe, L: OutputPin> AlarmOutput for HardwareAdapter<P, L> {
    fn set(&mut self, on: bool) {
        self.alarm.set(on);
    }
}
