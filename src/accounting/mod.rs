//! Temperature accounting engine.
//!
//! ```text
//!   tick lane ──▶ Sampler ──(every Nth tick)──▶ Accountant ──▶ AlarmOutput
//!                    │                              │
//!                    ▼                              ▼
//!             ┌─────────────────── MonitorState ─────────────────┐
//!             │ averages · ticks_since_evaluation · accrued · alarm│
//!             └──────────────────────────────────────────────────┘
//!                    ▲
//!  reset lane ──▶ ResetController ──▶ AlarmOutput
//! ```
//!
//! Everything here is pure logic against the port traits; the lanes and
//! hardware live elsewhere.

pub mod accountant;
pub mod reset;
pub mod sampler;
pub mod state;
pub mod zone;

pub use accountant::{Accountant, Evaluation};
pub use reset::ResetController;
pub use sampler::{Sampler, TickReport};
pub use state::{AccountingSnapshot, MonitorState};
pub use zone::{PerZone, Zone};
