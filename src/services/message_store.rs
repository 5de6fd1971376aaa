//! Latest-message gateway backed by a time-scored sorted set

use std::{
    collections::BTreeSet,
    sync::Mutex,
};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Key the messages live under in the sorted set
pub const MESSAGES_KEY: &str = "chat:messages";

/// A stored chat message; `time` is epoch milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub message: String,
    pub time: i64,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("message store unavailable: {0}")]
    Unavailable(String),
    #[error("failed to encode message: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("stored message is malformed: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Append/read-latest contract of the external message store
pub trait MessageStore: Send + Sync {
    fn append(&self, message: String) -> Result<MessageRecord, StoreError>;

    fn latest(&self) -> Result<Option<MessageRecord>, StoreError>;
}

/// In-process sorted set: members are JSON-encoded records scored by time.
///
/// Ordering matches a score-then-member sorted set, so the latest entry is
/// the highest score with ties broken by the greatest member.
#[derive(Debug, Default)]
pub struct InMemoryMessageStore {
    entries: Mutex<BTreeSet<(i64, String)>>,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record with an explicit score
    pub fn insert(&self, record: &MessageRecord) -> Result<(), StoreError> {
        let member = serde_json::to_string(record).map_err(StoreError::Encode)?;
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {}", e)))?;
        entries.insert((record.time, member));
        debug!("Stored message in {} at {}", MESSAGES_KEY, record.time);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MessageStore for InMemoryMessageStore {
    fn append(&self, message: String) -> Result<MessageRecord, StoreError> {
        let record = MessageRecord {
            message,
            time: Utc::now().timestamp_millis(),
        };
        self.insert(&record)?;
        Ok(record)
    }

    fn latest(&self) -> Result<Option<MessageRecord>, StoreError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {}", e)))?;

        entries
            .iter()
            .next_back()
            .map(|(_, member)| serde_json::from_str(member).map_err(StoreError::Decode))
            .transpose()
    }
}
