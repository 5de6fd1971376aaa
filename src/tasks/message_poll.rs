//! Message gateway polling task

use std::{sync::Arc, time::Duration};
use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::{
    services::{MessageRecord, MessageStore},
    state::AppState,
};

/// Read the latest message and return it only if it differs from `last_seen`.
///
/// Gateway failures are treated as "no new data".
pub fn poll_latest(store: &dyn MessageStore, last_seen: &mut Option<i64>) -> Option<MessageRecord> {
    match store.latest() {
        Ok(Some(record)) if *last_seen != Some(record.time) => {
            *last_seen = Some(record.time);
            Some(record)
        }
        Ok(_) => None,
        Err(e) => {
            warn!("Message store poll failed, treating as no new data: {}", e);
            None
        }
    }
}

/// Background task that polls the message store at a fixed cadence.
///
/// The result is not surfaced anywhere beyond the log.
pub async fn message_poll_task(state: Arc<AppState>, every: Duration) {
    info!("Starting message poll task (every {}ms)", every.as_millis());

    let mut interval = interval(every);
    let mut last_seen = None;

    loop {
        interval.tick().await;

        if let Some(record) = poll_latest(state.messages.as_ref(), &mut last_seen) {
            debug!("Latest message at {}: {:?}", record.time, record.message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{InMemoryMessageStore, StoreError};

    struct Unreachable;

    impl MessageStore for Unreachable {
        fn append(&self, _message: String) -> Result<MessageRecord, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        fn latest(&self) -> Result<Option<MessageRecord>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
    }

    #[test]
    fn poll_reports_each_message_once() {
        let store = InMemoryMessageStore::new();
        let mut last_seen = None;
        assert_eq!(poll_latest(&store, &mut last_seen), None);

        let record = MessageRecord { message: "hi".to_string(), time: 7 };
        store.insert(&record).unwrap();
        assert_eq!(poll_latest(&store, &mut last_seen), Some(record));
        assert_eq!(poll_latest(&store, &mut last_seen), None);
        assert_eq!(last_seen, Some(7));
    }

    #[test]
    fn unreachable_store_means_no_data() {
        let mut last_seen = Some(3);
        assert_eq!(poll_latest(&Unreachable, &mut last_seen), None);
        assert_eq!(last_seen, Some(3));
    }
}
