//! Over-temperature indicator LED.
//!
//! Any embedded-hal output pin works; on the board it is a
//! [`hw_init::RawOutputPin`](crate::drivers::hw_init::RawOutputPin).
//! A failed pin write is logged and the last known state is kept.

use embedded_hal::digital::{Error as _, OutputPin};
use log::warn;

use crate::app::ports::AlarmOutput;

pub struct AlarmLed<P> {
    pin: P,
    lit: bool,
}

impl<P: OutputPin> AlarmLed<P> {
    pub fn new(pin: P) -> Self {
        Self { pin, lit: false }
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }
}

impl<P: OutputPin> AlarmOutput for AlarmLed<P> {
    fn set(&mut self, on: bool) {
        let written = if on { self.pin.set_high() } else { self.pin.set_low() };
        match written {
            Ok(()) => self.lit = on,
            Err(e) => warn!("alarm LED: write {} failed ({:?})", on, e.kind()),
        }
    }
}
