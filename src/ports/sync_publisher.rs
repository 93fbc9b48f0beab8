//! SyncPublisher port - mirrors local mutations to the remote ticket service.
//!
//! Application handlers call this right after a successful local commit.
//! Publishing is best-effort: every method resolves to `()` whether the
//! remote call succeeded, failed or was skipped. Adapters record the outcome
//! in logs instead of returning it, so a failed sync can never roll back or
//! fail the primary operation.

use async_trait::async_trait;

use crate::domain::foundation::UserId;
use crate::domain::sync::{
    AvatarUpdated, SyncEvent, TicketCreated, TicketDeleted, TicketStatusChanged, TicketUpdated,
    UserRegistered,
};

/// Port for outbound sync.
///
/// Implementations must:
/// - Issue at most one remote call per event
/// - Never panic or surface an error to the caller
/// - Treat a missing base URL as a silent no-op
#[async_trait]
pub trait SyncPublisher: Send + Sync {
    /// Publish one event. Completes after the attempt (or after handing it
    /// off, for detached adapters).
    async fn publish(&self, event: SyncEvent);

    async fn publish_user_registered(&self, event: UserRegistered) {
        self.publish(event.into()).await
    }

    async fn publish_ticket_created(&self, event: TicketCreated) {
        self.publish(event.into()).await
    }

    async fn publish_ticket_updated(&self, event: TicketUpdated) {
        self.publish(event.into()).await
    }

    async fn publish_ticket_deleted(&self, event: TicketDeleted) {
        self.publish(event.into()).await
    }

    async fn publish_ticket_status_changed(&self, event: TicketStatusChanged) {
        self.publish(event.into()).await
    }

    async fn publish_avatar_updated(&self, user_id: UserId, bytes: Vec<u8>, mime_type: String) {
        self.publish(
            AvatarUpdated {
                user_id,
                bytes,
                mime_type,
            }
            .into(),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::TicketId;
    use crate::domain::sync::SyncEventKind;
    use std::sync::Mutex;

    struct CapturingPublisher {
        kinds: Mutex<Vec<SyncEventKind>>,
    }

    #[async_trait]
    impl SyncPublisher for CapturingPublisher {
        async fn publish(&self, event: SyncEvent) {
            self.kinds.lock().unwrap().push(event.kind());
        }
    }

    #[test]
    fn sync_publisher_is_object_safe() {
        fn _accepts_dyn(_publisher: &dyn SyncPublisher) {}
    }

    #[tokio::test]
    async fn per_kind_helpers_route_through_publish() {
        let publisher = CapturingPublisher {
            kinds: Mutex::new(Vec::new()),
        };

        publisher
            .publish_ticket_deleted(TicketDeleted { id: TicketId::new() })
            .await;
        publisher
            .publish_ticket_status_changed(TicketStatusChanged::new(TicketId::new(), "Done"))
            .await;
        publisher
            .publish_avatar_updated(UserId::new(), vec![1], "image/png".to_string())
            .await;

        assert_eq!(
            *publisher.kinds.lock().unwrap(),
            vec![
                SyncEventKind::TicketDeleted,
                SyncEventKind::TicketStatusChanged,
                SyncEventKind::AvatarUpdated,
            ]
        );
    }
}
