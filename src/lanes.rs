//! Interrupt-to-worker deferred-work lanes.
//!
//! Each lane carries at most one outstanding task.  The worker claims the
//! task, runs it to completion, and drops the claim.
//!
//! Two ways in:
//! - [`WorkLane::submit`] from task context (the esp_timer task, host
//!   threads).  It signals the lane directly, which runs the worker's waker
//!   on the caller's stack.
//! - [`WorkLane::submit_from_isr`] from a GPIO interrupt.  It only touches
//!   atomics and never runs a waker.  A task-context forwarder calls
//!   [`WorkLane::forward_deferred`] to hand the request to the worker.
//!
//! ```text
//! ┌─────────────┐ submit          ┌──────────────┐ claim ┌──────────────────┐
//! │ Tick timer  │────────────────▶│  TICK_LANE   │──────▶│ Sampler          │
//! └─────────────┘                 └──────────────┘       └──────────────────┘
//! ┌─────────────┐ submit_from_isr ┌──────────────┐ claim ┌──────────────────┐
//! │ Button ISR  │────────────────▶│  RESET_LANE  │──────▶│ ResetController  │
//! └─────────────┘                 └──────▲───────┘       └──────────────────┘
//!                  forward timer ────────┘ forward_deferred
//! ```
//!
//! ## Coalescing
//!
//! Submitting while a task is pending *or running* is a no-op and is
//! counted.  An overloaded worker therefore skips ticks instead of queueing
//! them or running two samplers at once, which makes an evaluation period
//! "at least N ticks" rather than "exactly N ticks" under load.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// Clock tick → sampler.
pub static TICK_LANE: WorkLane = WorkLane::new("tick");

/// Button press → reset controller.
pub static RESET_LANE: WorkLane = WorkLane::new("reset");

/// A single-slot, coalescing deferred-work lane.
pub struct WorkLane {
    name: &'static str,
    /// Set on submit, cleared when the claim is dropped.
    outstanding: AtomicBool,
    /// Accepted from an interrupt, not yet signalled.
    deferred: AtomicBool,
    ready: Signal<CriticalSectionRawMutex, ()>,
    coalesced: AtomicU32,
}

impl WorkLane {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            outstanding: AtomicBool::new(false),
            deferred: AtomicBool::new(false),
            ready: Signal::new(),
            coalesced: AtomicU32::new(0),
        }
    }

    /// Request one run.  Task context only: the worker's waker runs here.
    ///
    /// Returns `false` when a task is already outstanding and this request
    /// was folded into it.
    pub fn submit(&self) -> bool {
        if !self.open() {
            return false;
        }
        self.ready.signal(());
        true
    }

    /// Request one run from interrupt context.
    ///
    /// Atomics only.  The request stays parked until a task-context caller
    /// runs [`forward_deferred`](Self::forward_deferred).
    pub fn submit_from_isr(&self) -> bool {
        if !self.open() {
            return false;
        }
        self.deferred.store(true, Ordering::Release);
        true
    }

    /// Signal the worker for a request accepted by
    /// [`submit_from_isr`](Self::submit_from_isr).  Task context only.
    ///
    /// Returns `true` if there was one to forward.
    pub fn forward_deferred(&self) -> bool {
        if !self.deferred.swap(false, Ordering::AcqRel) {
            return false;
        }
        self.ready.signal(());
        true
    }

    fn open(&self) -> bool {
        if self.outstanding.swap(true, Ordering::AcqRel) {
            self.coalesced.fetch_add(1, Ordering::Relaxed);
            return false;
        }
        true
    }

    /// Wait for the next submitted task.
    pub async fn claim(&self) -> LaneClaim<'_> {
        self.ready.wait().await;
        LaneClaim { lane: self }
    }

    /// Claim the pending task without waiting, if there is one.
    pub fn try_claim(&self) -> Option<LaneClaim<'_>> {
        self.ready.try_take().map(|()| LaneClaim { lane: self })
    }

    /// A task is pending or running.
    pub fn is_outstanding(&self) -> bool {
        self.outstanding.load(Ordering::Acquire)
    }

    /// Submissions folded into an already-outstanding task since boot.
    pub fn coalesced(&self) -> u32 {
        self.coalesced.load(Ordering::Relaxed)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Proof that the worker owns the lane's one outstanding task.
///
/// Dropping it re-opens the lane for the next submission.
#[must_use = "dropping the claim immediately re-opens the lane"]
pub struct LaneClaim<'a> {
    lane: &'a WorkLane,
}

impl LaneClaim<'_> {
    pub fn lane(&self) -> &WorkLane {
        self.lane
    }
}

impl Drop for LaneClaim<'_> {
    fn drop(&mut self) {
        self.lane.outstanding.store(false, Ordering::Release);
    }
}
