//! Deferred-work worker.
//!
//! One [`edge_executor::LocalExecutor`] runs a task per lane.  Each task
//! waits for its lane, runs the monitor entry point to completion while it
//! holds the claim, and only then re-opens the lane.  Both tasks share the
//! hardware adapter and the event sink through `Rc<RefCell<_>>`; neither
//! holds a borrow across an `.await`.
//!
//! ```text
//!   TICK_LANE  ──claim──▶ tick_task  ──▶ Monitor::on_tick
//!   RESET_LANE ──claim──▶ reset_task ──▶ Monitor::on_reset
//! ```

use core::convert::Infallible;
use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};

use crate::accounting::Evaluation;
use crate::app::ports::{AlarmOutput, EventSink, SensorReader};
use crate::app::service::Monitor;
use crate::error::Result;
use crate::lanes::WorkLane;

/// Single-threaded shared handle.
pub type Shared<T> = Rc<RefCell<T>>;

/// Wait for one tick submission and run it.
pub async fn serve_tick<H, S>(
    lane: &WorkLane,
    monitor: &Monitor,
    hw: &Shared<H>,
    sink: &Shared<S>,
) -> Result<Option<Evaluation>>
where
    H: SensorReader + AlarmOutput,
    S: EventSink,
{
    let _claim = lane.claim().await;
    monitor.on_tick(&mut *hw.borrow_mut(), &mut *sink.borrow_mut())
}

/// Wait for one reset submission and run it.
pub async fn serve_reset<H, S>(lane: &WorkLane, monitor: &Monitor, hw: &Shared<H>, sink: &Shared<S>) -> Result<()>
where
    H: AlarmOutput,
    S: EventSink,
{
    let _claim = lane.claim().await;
    monitor.on_reset(&mut *hw.borrow_mut(), &mut *sink.borrow_mut())
}

async fn tick_task<H, S>(lane: &WorkLane, reset_lane: &WorkLane, monitor: &Monitor, hw: Shared<H>, sink: Shared<S>)
where
    H: SensorReader + AlarmOutput,
    S: EventSink,
{
    loop {
        match serve_tick(lane, monitor, &hw, &sink).await {
            Ok(Some(_)) => {
                let m = monitor.metrics().with_lanes(lane, reset_lane);
                info!(
                    "METRICS | ticks={} evals={} resets={} skipped={}/{} lock_timeouts={} coalesced={}/{}",
                    m.ticks,
                    m.evaluations,
                    m.resets,
                    m.sensor_failures.fridge,
                    m.sensor_failures.freezer,
                    m.lock_timeouts,
                    m.coalesced_ticks,
                    m.coalesced_resets,
                );
            }
            Ok(None) => {}
            // Already logged and counted by the monitor; the next tick retries.
            Err(e) => debug!("tick lane: {e}"),
        }
    }
}

async fn reset_task<H, S>(lane: &WorkLane, monitor: &Monitor, hw: Shared<H>, sink: Shared<S>)
where
    H: AlarmOutput,
    S: EventSink,
{
    loop {
        if let Err(e) = serve_reset(lane, monitor, &hw, &sink).await {
            debug!("reset lane: {e}");
        }
    }
}

/// Run both lanes on the calling thread.  Never returns.
///
/// Wakers registered here are only ever run from task context; the button
/// ISR reaches the reset lane through `submit_from_isr`.
pub fn run<H, S>(tick_lane: &WorkLane, reset_lane: &WorkLane, monitor: &Monitor, hw: H, sink: S) -> !
where
    H: SensorReader + AlarmOutput,
    S: EventSink,
{
    let executor: edge_executor::LocalExecutor<'_, 4> = edge_executor::LocalExecutor::new();

    let hw: Shared<H> = Rc::new(RefCell::new(hw));
    let sink: Shared<S> = Rc::new(RefCell::new(sink));

    executor
        .spawn(tick_task(tick_lane, reset_lane, monitor, hw.clone(), sink.clone()))
        .detach();
    executor
        .spawn(reset_task(reset_lane, monitor, hw, sink))
        .detach();

    info!("worker: {} and {} lanes running", tick_lane.name(), reset_lane.name());

    let never = futures_lite::future::block_on(executor.run(core::future::pending::<Infallible>()));
    match never {}
}
