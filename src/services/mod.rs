//! External collaborator module
//!
//! This module contains the gateway to the message store the timer page
//! talks to alongside the timer itself.

pub mod message_store;

// Re-export main types
pub use message_store::{InMemoryMessageStore, MessageRecord, MessageStore, StoreError};
