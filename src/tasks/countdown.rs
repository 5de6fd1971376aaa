//! Countdown background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::state::AppState;

/// One tick removes one second from the countdown
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

fn tick_interval() -> Interval {
    // interval() fires immediately; the first decrement must wait a full second
    let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
    interval
}

/// Background task that drives the timer one second at a time.
///
/// Every user control bumps the timer epoch. When a new epoch is observed the
/// interval restarts, and any tick that was already due is issued with the old
/// epoch and dropped by the state machine.
pub async fn countdown_task(state: Arc<AppState>) {
    info!("Starting countdown task");

    let mut updates = state.subscribe();
    let mut epoch = updates.borrow_and_update().epoch;
    let mut interval = tick_interval();

    loop {
        tokio::select! {
            _ = interval.tick() => {
                if let Err(e) = state.tick(epoch) {
                    error!("Failed to apply timer tick: {}", e);
                }
            }

            changed = updates.changed() => {
                if changed.is_err() {
                    warn!("Timer update channel closed, stopping countdown task");
                    break;
                }
                let latest = updates.borrow_and_update().epoch;
                if latest != epoch {
                    debug!("Timer control observed (epoch {} -> {}), restarting tick interval", epoch, latest);
                    epoch = latest;
                    interval.reset();
                }
            }
        }
    }
}
