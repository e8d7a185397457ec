//! NTC thermistor probe (10 kOhm @ 25 C, B = 3950).
//!
//! Wired in a voltage divider with a fixed 10 kOhm resistor, read via the
//! ESP32-S3 ADC1.  The simplified Beta (Steinhart-Hart) equation converts
//! resistance to temperature.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: [`AdcChannel`] reads ADC1 via the oneshot API (initialised by
//! hw_init).  On host/test: it reads a static `AtomicU16` per channel so the
//! simulator and tests can inject temperatures.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
use crate::error::SensorError;

use super::Probe;

const R25: f64 = 10_000.0;
const BETA: f64 = 3950.0;
const T25_K: f64 = 298.15;
const R_DIVIDER: f64 = 10_000.0;
const ADC_MAX: f64 = 4095.0;
/// Counts this close to either rail mean an open or shorted probe.
const RAIL_MARGIN: u16 = 12;

/// ADC1 has ten channels on the ESP32-S3.
#[cfg(not(target_os = "espidf"))]
const ADC1_CHANNELS: usize = 10;

#[cfg(not(target_os = "espidf"))]
static SIM_ADC: [AtomicU16; ADC1_CHANNELS] = [const { AtomicU16::new(2048) }; ADC1_CHANNELS];

/// Inject a raw reading for `channel` (host only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_raw(channel: u32, raw: u16) {
    if let Some(slot) = SIM_ADC.get(channel as usize) {
        slot.store(raw, Ordering::Relaxed);
    }
}

/// Inject a temperature for `channel` (host only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_celsius(channel: u32, celsius: f64) {
    sim_set_raw(channel, celsius_to_counts(celsius));
}

/// Source of raw 12-bit ADC counts.
pub trait RawAdc {
    fn read_raw(&mut self) -> Result<u16, SensorError>;
}

/// One ADC1 channel.
#[derive(Debug, Clone, Copy)]
pub struct AdcChannel {
    channel: u32,
}

impl AdcChannel {
    pub fn new(channel: u32) -> Self {
        Self { channel }
    }
}

impl RawAdc for AdcChannel {
    #[cfg(target_os = "espidf")]
    fn read_raw(&mut self) -> Result<u16, SensorError> {
        hw_init::adc1_read(self.channel)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_raw(&mut self) -> Result<u16, SensorError> {
        SIM_ADC
            .get(self.channel as usize)
            .map(|slot| slot.load(Ordering::Relaxed))
            .ok_or(SensorError::NotReady)
    }
}

/// A thermistor on an ADC input.
pub struct NtcProbe<A> {
    adc: A,
}

impl<A: RawAdc> NtcProbe<A> {
    pub fn new(adc: A) -> Self {
        Self { adc }
    }
}

impl<A: RawAdc> Probe for NtcProbe<A> {
    fn sample(&mut self) -> Result<f64, SensorError> {
        counts_to_celsius(self.adc.read_raw()?)
    }
}

/// Convert raw counts to °C.  Readings pinned to a rail are rejected.
pub fn counts_to_celsius(raw: u16) -> Result<f64, SensorError> {
    if raw <= RAIL_MARGIN || f64::from(raw) >= ADC_MAX - f64::from(RAIL_MARGIN) {
        return Err(SensorError::OutOfRange);
    }
    let ratio = f64::from(raw) / ADC_MAX;
    let r_ntc = R_DIVIDER * ratio / (1.0 - ratio);
    let inv_t = (1.0 / T25_K) + (1.0 / BETA) * (r_ntc / R25).ln();
    if inv_t <= 0.0 {
        return Err(SensorError::OutOfRange);
    }
    Ok((1.0 / inv_t) - 273.15)
}

/// Inverse of [`counts_to_celsius`], used to drive the simulator.
pub fn celsius_to_counts(celsius: f64) -> u16 {
    let t_k = celsius + 273.15;
    let r_ntc = R25 * (BETA * (1.0 / t_k - 1.0 / T25_K)).exp();
    let ratio = r_ntc / (R_DIVIDER + r_ntc);
    (ratio * ADC_MAX).round().clamp(0.0, ADC_MAX) as u16
}
