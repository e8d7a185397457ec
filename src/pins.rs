//! GPIO / peripheral pin assignments for the coldwatch main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Zone probes — NTC thermistors on ADC1
// ---------------------------------------------------------------------------

/// Fridge compartment thermistor.  ADC1 channel 4 (GPIO 5 on ESP32-S3).
pub const FRIDGE_TEMP_ADC_CHANNEL: u32 = 4;

/// Freezer compartment thermistor.  ADC1 channel 5 (GPIO 6 on ESP32-S3).
pub const FREEZER_TEMP_ADC_CHANNEL: u32 = 5;

// ---------------------------------------------------------------------------
// User interface
// ---------------------------------------------------------------------------

/// Acknowledge/reset button.  Active-low with internal pull-up, falling
/// edge interrupt.
pub const RESET_BUTTON_GPIO: i32 = 0;

/// Over-temperature indicator LED.  Active HIGH.
pub const ALARM_LED_GPIO: i32 = 2;
