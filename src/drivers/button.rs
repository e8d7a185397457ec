//! ISR-debounced reset button.
//!
//! ## Hardware
//!
//! Active-low momentary switch with internal pull-up.  The GPIO fires on the
//! falling edge; the ISR debounces against the last accepted edge and, when
//! the edge is accepted, marks a task on the reset lane with
//! `submit_from_isr`.  Nothing else happens in interrupt context; the
//! forward timer in `hw_timer` wakes the worker from task context.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::lanes::RESET_LANE;

const DEBOUNCE_MS: u32 = 50;

/// Edges closer together than the window are contact bounce.
pub struct EdgeDebouncer {
    window_ms: u32,
    last_accepted_ms: AtomicU32,
    armed: AtomicBool,
}

impl EdgeDebouncer {
    pub const fn new(window_ms: u32) -> Self {
        Self {
            window_ms,
            last_accepted_ms: AtomicU32::new(0),
            armed: AtomicBool::new(false),
        }
    }

    /// Returns `true` if the edge at `now_ms` counts as a new press.
    ///
    /// Single producer only (the button ISR), so load-then-store is enough.
    pub fn accept(&self, now_ms: u32) -> bool {
        if self.armed.load(Ordering::Acquire)
            && now_ms.wrapping_sub(self.last_accepted_ms.load(Ordering::Acquire)) < self.window_ms
        {
            return false;
        }
        self.last_accepted_ms.store(now_ms, Ordering::Release);
        self.armed.store(true, Ordering::Release);
        true
    }
}

static BUTTON_DEBOUNCE: EdgeDebouncer = EdgeDebouncer::new(DEBOUNCE_MS);

/// Call on every falling edge.  Returns `true` when a reset was queued;
/// bounces and presses that coalesce into an outstanding reset return
/// `false`.
pub fn button_isr_handler(now_ms: u32) -> bool {
    BUTTON_DEBOUNCE.accept(now_ms) && RESET_LANE.submit_from_isr()
}

/// Raw GPIO ISR registered by `hw_init::init_isr_service()`.
#[cfg(target_os = "espidf")]
pub(crate) unsafe extern "C" fn button_gpio_isr(_arg: *mut core::ffi::c_void) {
    // SAFETY: esp_timer_get_time is IRAM-safe and callable from an ISR.
    let now_ms = (unsafe { esp_idf_svc::sys::esp_timer_get_time() } / 1000) as u32;
    button_isr_handler(now_ms);
}
