//! Port traits — the boundary between the accounting engine and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Monitor (domain)
//! ```
//!
//! Driven adapters (zone sensors, the alarm indicator, event sinks)
//! implement these traits.  The [`Monitor`](super::service::Monitor)
//! consumes them via generics, so the domain core never touches hardware
//! directly.

use crate::accounting::Zone;
use crate::error::SensorError;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the sampler calls this once per zone per tick.
///
/// Must not block longer than one tick period.
pub trait SensorReader {
    /// Latest ambient temperature for `zone`, in °C.
    fn read(&mut self, zone: Zone) -> Result<f64, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Alarm port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// The shared over-temperature indicator.  Writes are idempotent.
pub trait AlarmOutput {
    fn set(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`MonitorEvent`](super::events::MonitorEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::MonitorEvent);
}
