//! Pomodoro Server - A state-managed HTTP server for an ADHD-friendly Pomodoro timer
//!
//! This library provides the timer state machine with its mode presets, the
//! background countdown that drives it, and the latest-message gateway that
//! sits beside it.

pub mod config;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, Mode, Period, TimerSnapshot, TimerState};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
