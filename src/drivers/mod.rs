//! Hardware initialisation, the tick source, and the button and LED drivers.

pub mod alarm_led;
pub mod button;
pub mod hw_init;
pub mod hw_timer;
