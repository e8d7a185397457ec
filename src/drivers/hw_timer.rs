//! Periodic timers.
//!
//! - Tick timer: submits to the tick lane once per tick period.
//! - Forward timer: every [`FORWARD_PERIOD_MS`] hands button presses that
//!   the GPIO ISR parked on the reset lane to the worker.
//!
//! On ESP-IDF both are esp_timers dispatched from the esp_timer task, never
//! from an ISR, so they may signal the lanes directly.  On simulation
//! targets each is a named thread that sleeps and submits.

use crate::drivers::hw_init::HwInitError;
use crate::lanes::{RESET_LANE, TICK_LANE};

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

/// Worst-case added latency between a button edge and the reset running.
pub const FORWARD_PERIOD_MS: u64 = 20;

#[cfg(target_os = "espidf")]
unsafe extern "C" fn tick_cb(_arg: *mut core::ffi::c_void) {
    TICK_LANE.submit();
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn forward_cb(_arg: *mut core::ffi::c_void) {
    RESET_LANE.forward_deferred();
}

/// Create and start a periodic esp_timer.  The handle is never stopped or
/// deleted, so it is not kept.
#[cfg(target_os = "espidf")]
fn start_periodic(
    name: &'static [u8],
    callback: unsafe extern "C" fn(*mut core::ffi::c_void),
    period_us: u64,
) -> Result<(), HwInitError> {
    let mut handle: esp_timer_handle_t = core::ptr::null_mut();
    // SAFETY: `name` is a NUL-terminated static; `handle` outlives the
    // create call and esp_timer owns the timer afterwards.
    unsafe {
        let args = esp_timer_create_args_t {
            callback: Some(callback),
            arg: core::ptr::null_mut(),
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: name.as_ptr() as *const _,
            // A late tick is coalesced by the lane anyway.
            skip_unhandled_events: true,
        };
        let ret = esp_timer_create(&args, &mut handle);
        if ret != ESP_OK as i32 { return Err(HwInitError::TimerFailed(ret)); }

        let ret = esp_timer_start_periodic(handle, period_us);
        if ret != ESP_OK as i32 { return Err(HwInitError::TimerFailed(ret)); }
    }
    Ok(())
}

/// Start the periodic tick timer.
#[cfg(target_os = "espidf")]
pub fn start_tick_timer(period_secs: u16) -> Result<(), HwInitError> {
    start_periodic(b"tick\0", tick_cb, u64::from(period_secs) * 1_000_000)?;
    info!("hw_timer: tick every {}s", period_secs);
    Ok(())
}

/// Start the reset-lane forward timer.
#[cfg(target_os = "espidf")]
pub fn start_forward_timer() -> Result<(), HwInitError> {
    start_periodic(b"btn-fwd\0", forward_cb, FORWARD_PERIOD_MS * 1_000)?;
    info!("hw_timer: button forward every {}ms", FORWARD_PERIOD_MS);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
fn spawn_periodic(name: &str, period: std::time::Duration, mut fire: impl FnMut() + Send + 'static) -> Result<(), HwInitError> {
    std::thread::Builder::new()
        .name(name.into())
        .spawn(move || {
            loop {
                std::thread::sleep(period);
                fire();
            }
        })
        .map(drop)
        .map_err(|_| HwInitError::TimerFailed(-1))
}

#[cfg(not(target_os = "espidf"))]
pub fn start_tick_timer(period_secs: u16) -> Result<(), HwInitError> {
    spawn_periodic("tick-timer", std::time::Duration::from_secs(u64::from(period_secs)), || {
        TICK_LANE.submit();
    })?;
    log::info!("hw_timer(sim): tick every {}s", period_secs);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn start_forward_timer() -> Result<(), HwInitError> {
    spawn_periodic("btn-forward", std::time::Duration::from_millis(FORWARD_PERIOD_MS), || {
        RESET_LANE.forward_deferred();
    })?;
    log::info!("hw_timer(sim): button forward every {}ms", FORWARD_PERIOD_MS);
    Ok(())
}
