//! DeleteTicketHandler - Command handler for removing tickets.

use std::sync::Arc;

use crate::domain::foundation::TicketId;
use crate::domain::sync::TicketDeleted;
use crate::domain::ticket::TicketError;
use crate::ports::{SyncPublisher, TicketRepository};

/// Command to delete a ticket.
#[derive(Debug, Clone, Copy)]
pub struct DeleteTicketCommand {
    pub ticket_id: TicketId,
}

/// Handler for deleting tickets.
///
/// The remote copy is only told about deletions the local store confirmed.
pub struct DeleteTicketHandler {
    tickets: Arc<dyn TicketRepository>,
    publisher: Arc<dyn SyncPublisher>,
}

impl DeleteTicketHandler {
    pub fn new(tickets: Arc<dyn TicketRepository>, publisher: Arc<dyn SyncPublisher>) -> Self {
        Self { tickets, publisher }
    }

    pub async fn handle(&self, cmd: DeleteTicketCommand) -> Result<(), TicketError> {
        if !self.tickets.delete(&cmd.ticket_id).await? {
            return Err(TicketError::not_found(cmd.ticket_id));
        }
        tracing::info!(ticket_id = %cmd.ticket_id, "Ticket deleted");

        self.publisher
            .publish_ticket_deleted(TicketDeleted { id: cmd.ticket_id })
            .await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::in_memory::{InMemoryTicketRepository, InMemoryUserRepository};
    use crate::adapters::sync::RecordingSyncPublisher;
    use crate::domain::sync::{SyncEvent, SyncEventKind};
    use crate::domain::ticket::{NewTicket, Ticket};

    fn setup() -> (
        DeleteTicketHandler,
        Arc<InMemoryTicketRepository>,
        Arc<RecordingSyncPublisher>,
    ) {
        let tickets = Arc::new(InMemoryTicketRepository::new(Arc::new(
            InMemoryUserRepository::new(),
        )));
        let publisher = Arc::new(RecordingSyncPublisher::new());
        let handler = DeleteTicketHandler::new(tickets.clone(), publisher.clone());
        (handler, tickets, publisher)
    }

    #[tokio::test]
    async fn confirmed_delete_publishes_once() {
        let (handler, tickets, publisher) = setup();
        let ticket = Ticket::create(NewTicket {
            title: "Delete me".into(),
            ..Default::default()
        })
        .unwrap();
        tickets.save(&ticket).await.unwrap();

        handler
            .handle(DeleteTicketCommand { ticket_id: ticket.id })
            .await
            .unwrap();

        assert!(tickets.find_by_id(&ticket.id).await.unwrap().is_none());
        assert_eq!(
            publisher.published_events(),
            vec![SyncEvent::TicketDeleted(TicketDeleted { id: ticket.id })]
        );
    }

    #[tokio::test]
    async fn deleting_unknown_ticket_never_publishes() {
        let (handler, _, publisher) = setup();
        let missing = TicketId::new();

        let err = handler
            .handle(DeleteTicketCommand { ticket_id: missing })
            .await
            .unwrap_err();

        assert_eq!(err, TicketError::not_found(missing));
        assert!(publisher
            .events_of_kind(SyncEventKind::TicketDeleted)
            .is_empty());
    }
}
