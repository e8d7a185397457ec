//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements    | Connects to                 |
//! |------------|---------------|-----------------------------|
//! | `hardware` | SensorReader  | NTC probes on ESP32 ADC1    |
//! |            | AlarmOutput   | Alarm LED GPIO              |
//! | `log_sink` | EventSink     | Serial log output           |

pub mod hardware;
pub mod log_sink;
