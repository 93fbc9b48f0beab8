//! Publisher wired when no remote base URL is configured.

use async_trait::async_trait;

use crate::domain::sync::SyncEvent;
use crate::ports::SyncPublisher;

/// Drops every event without building an HTTP client.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledSyncPublisher;

#[async_trait]
impl SyncPublisher for DisabledSyncPublisher {
    async fn publish(&self, event: SyncEvent) {
        tracing::debug!(
            event_kind = %event.kind(),
            subject = %event.subject(),
            "Sync disabled, skipping"
        );
    }
}
