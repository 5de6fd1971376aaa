//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::services::MessageStore;
use super::{Mode, Period, TickOutcome, TimerSnapshot, TimerState};

/// Main application state that owns the timer and the message gateway
pub struct AppState {
    /// Authoritative timer state machine
    pub timer_state: Arc<Mutex<TimerState>>,
    /// Message store gateway
    pub messages: Arc<dyn MessageStore>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel for timer snapshots after every transition
    pub timer_update_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _timer_update_rx: watch::Receiver<TimerSnapshot>,
}

impl AppState {
    /// Create a new AppState with a paused timer in `mode`
    pub fn new(port: u16, host: String, mode: Mode, messages: Arc<dyn MessageStore>) -> Self {
        let timer = TimerState::new(mode);
        let (timer_update_tx, timer_update_rx) = watch::channel(timer.snapshot());

        Self {
            timer_state: Arc::new(Mutex::new(timer)),
            messages,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            timer_update_tx,
            _timer_update_rx: timer_update_rx,
        }
    }

    /// Apply a transition to the timer and publish the resulting snapshot
    fn transition<F, R>(&self, action: Option<&str>, updater: F) -> Result<(R, TimerSnapshot), String>
    where
        F: FnOnce(&mut TimerState) -> R,
    {
        let mut timer = self.timer_state.lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;

        let outcome = updater(&mut *timer);
        let snapshot = timer.snapshot();
        drop(timer); // Release the lock early

        if let Some(action) = action {
            if let Ok(mut last_action) = self.last_action.lock() {
                *last_action = Some(action.to_string());
            }
            if let Ok(mut last_time) = self.last_action_time.lock() {
                *last_time = Some(Utc::now());
            }
        }

        // send_replace never fails, even with every receiver gone
        self.timer_update_tx.send_replace(snapshot.clone());

        Ok((outcome, snapshot))
    }

    /// Start a paused timer or pause a running one
    pub fn start_or_pause(&self) -> Result<TimerSnapshot, String> {
        let (running, snapshot) = self.transition(Some("toggle"), |timer| timer.start_or_pause())?;
        info!(
            "Timer {} at {} ({})",
            if running { "started" } else { "paused" },
            snapshot.clock,
            snapshot.display_label
        );
        Ok(snapshot)
    }

    /// Refill the current period and pause
    pub fn reset(&self) -> Result<TimerSnapshot, String> {
        let (_, snapshot) = self.transition(Some("reset"), |timer| timer.reset())?;
        info!("Timer reset to {} ({})", snapshot.clock, snapshot.display_label);
        Ok(snapshot)
    }

    /// Jump to the next period
    pub fn skip(&self) -> Result<TimerSnapshot, String> {
        let (next, snapshot) = self.transition(Some("skip"), |timer| timer.skip())?;
        info!(
            "Skipped to {} ({} cycles completed)",
            next.label(),
            snapshot.completed_work_cycles
        );
        Ok(snapshot)
    }

    /// Switch timing mode
    pub fn change_mode(&self, mode: Mode) -> Result<TimerSnapshot, String> {
        let (_, snapshot) = self.transition(Some("change-mode"), |timer| timer.change_mode(mode))?;
        info!("Timer mode set to: {} ({})", mode, snapshot.preset_summary);
        Ok(snapshot)
    }

    /// Commit a custom duration; `Ok(None)` when the timer is not in custom mode
    pub fn set_custom_duration(&self, period: Period, raw: &str) -> Result<Option<TimerSnapshot>, String> {
        let (committed, snapshot) = self.transition(Some("set-custom-duration"), |timer| {
            timer.set_custom_duration(period, raw)
        })?;

        match committed {
            Some(minutes) => {
                info!("Custom {} duration set to {} min (input {:?})", period.label(), minutes, raw);
                Ok(Some(snapshot))
            }
            None => {
                warn!("Ignoring custom duration for {} outside custom mode", period.label());
                Ok(None)
            }
        }
    }

    /// Close the custom editor and restart the current period with the new durations
    pub fn apply_custom_durations(&self) -> Result<TimerSnapshot, String> {
        let (_, snapshot) = self.transition(Some("apply-custom"), |timer| timer.apply_custom_durations())?;
        info!("Custom durations applied: {}", snapshot.preset_summary);
        Ok(snapshot)
    }

    /// Zero the completed-cycle counter
    pub fn reset_cycle_counter(&self) -> Result<TimerSnapshot, String> {
        let (cleared, snapshot) = self.transition(Some("reset-cycles"), |timer| timer.reset_cycle_counter())?;
        if cleared {
            info!("Completed cycle counter reset");
        } else {
            debug!("Cycle counter already at zero");
        }
        Ok(snapshot)
    }

    /// Feed one elapsed second issued under `epoch` into the timer
    pub fn tick(&self, epoch: u64) -> Result<TickOutcome, String> {
        let (outcome, snapshot) = self.transition(None, |timer| timer.tick(epoch))?;
        match outcome {
            TickOutcome::Expired { next } => {
                info!("Period expired, now {} ({})", next.label(), snapshot.clock);
            }
            TickOutcome::Counted => debug!("Tick: {} remaining", snapshot.clock),
            TickOutcome::Ignored => {}
        }
        Ok(outcome)
    }

    /// Get current timer snapshot
    pub fn get_timer_snapshot(&self) -> Result<TimerSnapshot, String> {
        self.timer_state.lock()
            .map(|timer| timer.snapshot())
            .map_err(|e| format!("Failed to lock timer state: {}", e))
    }

    /// Subscribe to timer snapshots
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.timer_update_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::InMemoryMessageStore;

    fn test_state() -> AppState {
        AppState::new(0, "127.0.0.1".to_string(), Mode::Moderate, Arc::new(InMemoryMessageStore::new()))
    }

    #[test]
    fn transitions_publish_snapshots() {
        let state = test_state();
        let rx = state.subscribe();

        state.skip().unwrap();
        let published = rx.borrow().clone();
        assert_eq!(published.period, Period::ShortBreak);
        assert_eq!(published.completed_work_cycles, 1);
        assert_eq!(published, state.get_timer_snapshot().unwrap());
    }

    #[test]
    fn controls_record_last_action() {
        let state = test_state();
        assert_eq!(state.get_last_action(), (None, None));

        state.change_mode(Mode::Severe).unwrap();
        let (action, time) = state.get_last_action();
        assert_eq!(action.as_deref(), Some("change-mode"));
        assert!(time.is_some());

        let epoch = state.get_timer_snapshot().unwrap().epoch;
        state.tick(epoch).unwrap();
        assert_eq!(state.get_last_action().0.as_deref(), Some("change-mode"));
    }

    #[test]
    fn custom_duration_outside_custom_mode_is_not_applied() {
        let state = test_state();
        assert_eq!(state.set_custom_duration(Period::Work, "40").unwrap(), None);

        state.change_mode(Mode::Custom).unwrap();
        let snapshot = state.set_custom_duration(Period::Work, "40").unwrap().unwrap();
        assert_eq!(snapshot.custom.work, 40);
    }
}
