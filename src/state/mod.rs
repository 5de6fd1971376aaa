//! State management module
//!
//! This module contains the timer state machine, its presets, and the shared
//! application state that owns it.

pub mod presets;
pub mod app_state;
pub mod timer_state;

// Re-export main types
pub use presets::{CustomDurations, CustomInputs, Mode, Period, Preset};
pub use app_state::AppState;
pub use timer_state::{format_clock, TickOutcome, TimerSnapshot, TimerState};
