//! Pomodoro timer state machine
//!
//! `TimerState` is the single authoritative owner of mode, period, countdown
//! and cycle counter. Every control operation runs to completion on `&mut self`;
//! readers only ever see a [`TimerSnapshot`].

use serde::{Deserialize, Serialize};

use super::presets::{CustomDurations, CustomInputs, Mode, Period, Preset};

/// Every fourth completed work period is followed by a long break
pub const CYCLES_PER_LONG_BREAK: u32 = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct TimerState {
    pub mode: Mode,
    pub period: Period,
    pub remaining_seconds: u64,
    pub running: bool,
    pub completed_work_cycles: u32,
    pub custom: CustomDurations,
    pub custom_inputs: CustomInputs,
    pub editing_custom: bool,
    /// Bumped by every user control; ticks carrying an older epoch are dropped
    epoch: u64,
}

/// Result of feeding one elapsed second into the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Stale epoch or paused
    Ignored,
    Counted,
    /// Countdown hit zero and the period advanced
    Expired { next: Period },
}

impl TimerState {
    /// Paused at the start of a work period in the given mode
    pub fn new(mode: Mode) -> Self {
        let custom = CustomDurations::default();
        let mut state = Self {
            mode,
            period: Period::Work,
            remaining_seconds: 0,
            running: false,
            completed_work_cycles: 0,
            custom,
            custom_inputs: CustomInputs::from_durations(&custom),
            editing_custom: mode == Mode::Custom,
            epoch: 0,
        };
        state.remaining_seconds = state.period_seconds(Period::Work);
        state
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Durations in effect for the current mode
    pub fn effective_preset(&self) -> Preset {
        self.mode.preset().unwrap_or(self.custom)
    }

    pub fn duration_minutes(&self, period: Period) -> u32 {
        self.effective_preset().minutes(period)
    }

    fn period_seconds(&self, period: Period) -> u64 {
        u64::from(self.duration_minutes(period)) * 60
    }

    /// Elapsed fraction of the work period; 0 during breaks or while paused
    pub fn progress_fraction(&self) -> f64 {
        if self.period != Period::Work || !self.running {
            return 0.0;
        }
        let total = self.period_seconds(Period::Work) as f64;
        if total <= 0.0 {
            return 0.0;
        }
        ((total - self.remaining_seconds as f64) / total).clamp(0.0, 1.0)
    }

    pub fn display_label(&self) -> &'static str {
        self.period.label()
    }

    /// Remaining time as zero-padded `MM:SS`
    pub fn clock(&self) -> String {
        format_clock(self.remaining_seconds)
    }

    fn bump_epoch(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
    }

    /// Toggle between running and paused; remaining time is kept as-is.
    pub fn start_or_pause(&mut self) -> bool {
        self.bump_epoch();
        self.running = !self.running;
        self.running
    }

    /// Refill the current period and pause
    pub fn reset(&mut self) {
        self.bump_epoch();
        self.remaining_seconds = self.period_seconds(self.period);
        self.running = false;
    }

    /// Advance to the next period without waiting for expiry
    pub fn skip(&mut self) -> Period {
        self.bump_epoch();
        self.advance_period()
    }

    fn advance_period(&mut self) -> Period {
        let next = match self.period {
            Period::Work => {
                self.completed_work_cycles = self.completed_work_cycles.saturating_add(1);
                if self.completed_work_cycles % CYCLES_PER_LONG_BREAK == 0 {
                    Period::LongBreak
                } else {
                    Period::ShortBreak
                }
            }
            Period::ShortBreak | Period::LongBreak => Period::Work,
        };
        self.period = next;
        self.remaining_seconds = self.period_seconds(next);
        next
    }

    /// Count one elapsed second issued under `epoch`
    pub fn tick(&mut self, epoch: u64) -> TickOutcome {
        if epoch != self.epoch || !self.running {
            return TickOutcome::Ignored;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            TickOutcome::Expired {
                next: self.advance_period(),
            }
        } else {
            TickOutcome::Counted
        }
    }

    /// Switch mode and restart from a fresh work period.
    ///
    /// Named modes overwrite the custom durations with their preset so the
    /// editor opens pre-filled with whatever was last in effect.
    pub fn change_mode(&mut self, mode: Mode) {
        let was_running = self.running;
        self.running = false;
        self.bump_epoch();

        self.mode = mode;
        self.period = Period::Work;
        match mode.preset() {
            Some(preset) => {
                self.editing_custom = false;
                self.custom = preset;
                self.custom_inputs = CustomInputs::from_durations(&preset);
            }
            None => self.editing_custom = true,
        }
        self.remaining_seconds = self.period_seconds(Period::Work);
        self.running = was_running;
    }

    /// Commit raw input for one custom duration. Returns the stored minutes,
    /// or `None` when the timer is not in custom mode.
    ///
    /// The running countdown is untouched until the next reset, period change
    /// or [`apply_custom_durations`](Self::apply_custom_durations).
    pub fn set_custom_duration(&mut self, period: Period, raw: &str) -> Option<u32> {
        if self.mode != Mode::Custom {
            return None;
        }
        let minutes = period.commit_minutes(raw);
        self.custom.set_minutes(period, minutes);
        self.custom_inputs.set(period, minutes.to_string());
        Some(minutes)
    }

    /// Close the custom editor and refill the current period with its
    /// (possibly new) duration. Running state is kept.
    pub fn apply_custom_durations(&mut self) {
        self.bump_epoch();
        self.editing_custom = false;
        self.remaining_seconds = self.period_seconds(self.period);
    }

    /// Clear the completed-cycle counter; `false` if it was already zero
    pub fn reset_cycle_counter(&mut self) -> bool {
        if self.completed_work_cycles == 0 {
            return false;
        }
        self.completed_work_cycles = 0;
        true
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            mode: self.mode,
            mode_label: self.mode.label().to_string(),
            period: self.period,
            display_label: self.display_label().to_string(),
            remaining_seconds: self.remaining_seconds,
            clock: self.clock(),
            running: self.running,
            completed_work_cycles: self.completed_work_cycles,
            progress_fraction: self.progress_fraction(),
            preset_summary: self.effective_preset().summary(),
            custom: self.custom,
            custom_inputs: self.custom_inputs.clone(),
            editing_custom: self.editing_custom,
            epoch: self.epoch,
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}

/// Read-only view published to subscribers after every transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub mode: Mode,
    pub mode_label: String,
    pub period: Period,
    pub display_label: String,
    pub remaining_seconds: u64,
    pub clock: String,
    pub running: bool,
    pub completed_work_cycles: u32,
    pub progress_fraction: f64,
    pub preset_summary: String,
    pub custom: CustomDurations,
    pub custom_inputs: CustomInputs,
    pub editing_custom: bool,
    #[serde(skip)]
    pub epoch: u64,
}

impl Default for TimerSnapshot {
    fn default() -> Self {
        TimerState::default().snapshot()
    }
}

/// Format seconds as "MM:SS"
pub fn format_clock(total_seconds: u64) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}
