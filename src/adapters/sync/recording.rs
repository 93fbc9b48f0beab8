//! In-memory `SyncPublisher` that records events for assertions.
//!
//! Testing only. Lock poisoning panics.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::sync::{SyncEvent, SyncEventKind};
use crate::ports::SyncPublisher;

/// Captures every published event in order.
#[derive(Debug, Default)]
pub struct RecordingSyncPublisher {
    published: RwLock<Vec<SyncEvent>>,
}

impl RecordingSyncPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events published so far.
    pub fn published_events(&self) -> Vec<SyncEvent> {
        self.published
            .read()
            .expect("RecordingSyncPublisher: lock poisoned")
            .clone()
    }

    pub fn events_of_kind(&self, kind: SyncEventKind) -> Vec<SyncEvent> {
        self.published_events()
            .into_iter()
            .filter(|e| e.kind() == kind)
            .collect()
    }

    pub fn event_count(&self) -> usize {
        self.published
            .read()
            .expect("RecordingSyncPublisher: lock poisoned")
            .len()
    }

    pub fn clear(&self) {
        self.published
            .write()
            .expect("RecordingSyncPublisher: lock poisoned")
            .clear();
    }
}

#[async_trait]
impl SyncPublisher for RecordingSyncPublisher {
    async fn publish(&self, event: SyncEvent) {
        self.published
            .write()
            .expect("RecordingSyncPublisher: lock poisoned")
            .push(event);
    }
}
