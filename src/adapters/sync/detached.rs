//! Fire-and-forget wrapper around another `SyncPublisher`.
//!
//! Each event is moved into exactly one spawned task, so the request that
//! produced it can respond without waiting on the remote service. There
//! is no queue: an event is attempted once and then dropped.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinHandle;

use crate::domain::sync::SyncEvent;
use crate::ports::SyncPublisher;

/// Spawns one task per event onto the current runtime.
#[derive(Clone)]
pub struct DetachedSyncPublisher {
    inner: Arc<dyn SyncPublisher>,
}

impl DetachedSyncPublisher {
    pub fn new(inner: Arc<dyn SyncPublisher>) -> Self {
        Self { inner }
    }

    /// Hands the event to a new task and returns its handle.
    pub fn dispatch(&self, event: SyncEvent) -> JoinHandle<()> {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move { inner.publish(event).await })
    }
}

#[async_trait]
impl SyncPublisher for DetachedSyncPublisher {
    async fn publish(&self, event: SyncEvent) {
        tracing::trace!(event_kind = %event.kind(), "Dispatching sync event in background");
        drop(self.dispatch(event));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sync::RecordingSyncPublisher;
    use crate::domain::foundation::TicketId;
    use crate::domain::sync::{SyncEventKind, TicketDeleted};
    use std::time::Duration;
    use tokio::sync::Notify;

    struct GatedPublisher {
        gate: Arc<Notify>,
        recorder: Arc<RecordingSyncPublisher>,
    }

    #[async_trait]
    impl SyncPublisher for GatedPublisher {
        async fn publish(&self, event: SyncEvent) {
            self.gate.notified().await;
            self.recorder.publish(event).await;
        }
    }

    #[tokio::test]
    async fn dispatch_runs_inner_publisher_once() {
        let recorder = Arc::new(RecordingSyncPublisher::new());
        let detached = DetachedSyncPublisher::new(recorder.clone());

        detached
            .dispatch(TicketDeleted { id: TicketId::new() }.into())
            .await
            .unwrap();

        assert_eq!(recorder.event_count(), 1);
        assert_eq!(
            recorder.events_of_kind(SyncEventKind::TicketDeleted).len(),
            1
        );
    }

    #[tokio::test]
    async fn publish_returns_before_inner_completes() {
        let gate = Arc::new(Notify::new());
        let recorder = Arc::new(RecordingSyncPublisher::new());
        let detached = DetachedSyncPublisher::new(Arc::new(GatedPublisher {
            gate: gate.clone(),
            recorder: recorder.clone(),
        }));

        detached
            .publish(TicketDeleted { id: TicketId::new() }.into())
            .await;
        assert_eq!(recorder.event_count(), 0);

        gate.notify_one();
        for _ in 0..50 {
            if recorder.event_count() == 1 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(recorder.event_count(), 1);
    }
}
