//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod countdown;
pub mod message_poll;

// Re-export main functions
pub use countdown::countdown_task;
pub use message_poll::message_poll_task;
