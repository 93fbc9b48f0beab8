//! CreateTicketHandler - Command handler for opening tickets.

use std::sync::Arc;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::sync::TicketCreated;
use crate::domain::ticket::{NewTicket, Ticket, TicketError};
use crate::ports::{SyncPublisher, TicketRepository, UserRepository};

use super::ensure_assignee_exists;

/// Command to create a ticket.
#[derive(Debug, Clone, Default)]
pub struct CreateTicketCommand {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<Timestamp>,
    pub assigned_user_id: Option<UserId>,
}

/// Handler for creating tickets.
pub struct CreateTicketHandler {
    tickets: Arc<dyn TicketRepository>,
    users: Arc<dyn UserRepository>,
    publisher: Arc<dyn SyncPublisher>,
}

impl CreateTicketHandler {
    pub fn new(
        tickets: Arc<dyn TicketRepository>,
        users: Arc<dyn UserRepository>,
        publisher: Arc<dyn SyncPublisher>,
    ) -> Self {
        Self {
            tickets,
            users,
            publisher,
        }
    }

    pub async fn handle(&self, cmd: CreateTicketCommand) -> Result<Ticket, TicketError> {
        // 1. Validate input and build the aggregate
        let ticket = Ticket::create(NewTicket {
            title: cmd.title,
            description: cmd.description,
            status: cmd.status,
            priority: cmd.priority,
            due_date: cmd.due_date,
            assigned_user_id: cmd.assigned_user_id,
        })?;

        // 2. Assignee must be a known user
        ensure_assignee_exists(self.users.as_ref(), ticket.assigned_user_id).await?;

        // 3. Persist
        self.tickets.save(&ticket).await?;
        tracing::info!(ticket_id = %ticket.id, "Ticket created");

        // 4. Mirror
        self.publisher
            .publish_ticket_created(TicketCreated::from_ticket(&ticket))
            .await;

        Ok(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::in_memory::{InMemoryTicketRepository, InMemoryUserRepository};
    use crate::adapters::sync::RecordingSyncPublisher;
    use crate::domain::foundation::{DomainError, ErrorCode, Role, TicketId};
    use crate::domain::sync::{SyncEvent, SyncStatus};
    use crate::domain::user::User;
    use crate::ports::TicketListing;
    use async_trait::async_trait;

    struct FailingTicketRepository;

    #[async_trait]
    impl TicketRepository for FailingTicketRepository {
        async fn save(&self, _ticket: &Ticket) -> Result<(), DomainError> {
            Err(DomainError::new(ErrorCode::DatabaseError, "Simulated save failure"))
        }
        async fn update(&self, _ticket: &Ticket) -> Result<(), DomainError> {
            Ok(())
        }
        async fn find_by_id(&self, _id: &TicketId) -> Result<Option<Ticket>, DomainError> {
            Ok(None)
        }
        async fn list_all(&self) -> Result<Vec<TicketListing>, DomainError> {
            Ok(vec![])
        }
        async fn list_by_assignee(&self, _u: &str) -> Result<Vec<TicketListing>, DomainError> {
            Ok(vec![])
        }
        async fn delete(&self, _id: &TicketId) -> Result<bool, DomainError> {
            Ok(false)
        }
    }

    fn setup() -> (
        CreateTicketHandler,
        Arc<InMemoryUserRepository>,
        Arc<InMemoryTicketRepository>,
        Arc<RecordingSyncPublisher>,
    ) {
        let users = Arc::new(InMemoryUserRepository::new());
        let tickets = Arc::new(InMemoryTicketRepository::new(users.clone()));
        let publisher = Arc::new(RecordingSyncPublisher::new());
        let handler = CreateTicketHandler::new(tickets.clone(), users.clone(), publisher.clone());
        (handler, users, tickets, publisher)
    }

    fn command(title: &str) -> CreateTicketCommand {
        CreateTicketCommand {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn creates_ticket_with_defaults_and_publishes_normalized_event() {
        let (handler, _, tickets, publisher) = setup();

        let ticket = handler
            .handle(CreateTicketCommand {
                priority: Some("High".into()),
                ..command("Printer on fire")
            })
            .await
            .unwrap();

        assert_eq!(ticket.status, "To Do");
        assert!(tickets.find_by_id(&ticket.id).await.unwrap().is_some());

        let events = publisher.published_events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            SyncEvent::TicketCreated(e) => {
                assert_eq!(e.id, ticket.id);
                assert_eq!(e.status, SyncStatus::Todo);
                assert_eq!(e.priority, "high");
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[tokio::test]
    async fn invalid_title_publishes_nothing() {
        let (handler, _, _, publisher) = setup();

        let err = handler.handle(command("ab")).await.unwrap_err();

        assert!(matches!(err, TicketError::ValidationFailed { ref field, .. } if field == "title"));
        assert_eq!(publisher.event_count(), 0);
    }

    #[tokio::test]
    async fn unknown_assignee_is_rejected() {
        let (handler, _, _, publisher) = setup();

        let err = handler
            .handle(CreateTicketCommand {
                assigned_user_id: Some(UserId::new()),
                ..command("Assigned to ghost")
            })
            .await
            .unwrap_err();

        assert!(matches!(err, TicketError::ValidationFailed { .. }));
        assert_eq!(publisher.event_count(), 0);
    }

    #[tokio::test]
    async fn known_assignee_is_accepted() {
        let (handler, users, _, _) = setup();
        let alice = User::register("alice", "alice@example.com", "hash".into(), Role::User);
        users.save(&alice).await.unwrap();

        let ticket = handler
            .handle(CreateTicketCommand {
                assigned_user_id: Some(alice.id),
                ..command("For alice")
            })
            .await
            .unwrap();

        assert_eq!(ticket.assigned_user_id, Some(alice.id));
    }

    #[tokio::test]
    async fn failed_save_publishes_nothing() {
        let users = Arc::new(InMemoryUserRepository::new());
        let publisher = Arc::new(RecordingSyncPublisher::new());
        let handler =
            CreateTicketHandler::new(Arc::new(FailingTicketRepository), users, publisher.clone());

        let err = handler.handle(command("Will not save")).await.unwrap_err();

        assert!(matches!(err, TicketError::Infrastructure(_)));
        assert_eq!(publisher.event_count(), 0);
    }
}
