//! Reaction trigger deduplication.

use crate::MessageId;
use parking_lot::Mutex;
use std::collections::HashSet;

/// Messages that already produced a report through the reaction trigger.
///
/// Append-only for the lifetime of the process. Independent of the report
/// store: resolving a report does not make its message reportable by reaction
/// again.
#[derive(Debug, Default)]
pub struct TriggerDedup {
    reported: Mutex<HashSet<MessageId>>,
}

impl TriggerDedup {
    /// Create an empty marker set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a message as reported.
    ///
    /// Returns `true` only for the first call with a given id; the check and
    /// the insert happen under one lock.
    ///
    /// ```
    /// use tribunal_core::{MessageId, TriggerDedup};
    ///
    /// let dedup = TriggerDedup::new();
    /// assert!(dedup.mark(MessageId(9)));
    /// assert!(!dedup.mark(MessageId(9)));
    /// ```
    pub fn mark(&self, message: MessageId) -> bool {
        self.reported.lock().insert(message)
    }

    /// Whether a message has been marked.
    pub fn contains(&self, message: MessageId) -> bool {
        self.reported.lock().contains(&message)
    }

    /// Number of marked messages.
    pub fn len(&self) -> usize {
        self.reported.lock().len()
    }

    /// Whether nothing has been marked yet.
    pub fn is_empty(&self) -> bool {
        self.reported.lock().is_empty()
    }
}
