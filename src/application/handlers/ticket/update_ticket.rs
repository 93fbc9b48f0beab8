//! UpdateTicketHandler - Command handler for editing tickets.

use std::sync::Arc;

use crate::domain::foundation::{TicketId, Timestamp, UserId};
use crate::domain::sync::TicketUpdated;
use crate::domain::ticket::{Ticket, TicketChanges, TicketError};
use crate::ports::{SyncPublisher, TicketRepository, UserRepository};

use super::ensure_assignee_exists;

/// Command to replace a ticket's editable fields.
#[derive(Debug, Clone)]
pub struct UpdateTicketCommand {
    pub ticket_id: TicketId,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub due_date: Option<Timestamp>,
    pub assigned_user_id: Option<UserId>,
}

/// Handler for updating tickets.
pub struct UpdateTicketHandler {
    tickets: Arc<dyn TicketRepository>,
    users: Arc<dyn UserRepository>,
    publisher: Arc<dyn SyncPublisher>,
}

impl UpdateTicketHandler {
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

    pub async fn handle(&self, cmd: UpdateTicketCommand) -> Result<Ticket, TicketError> {
        let mut ticket = self
            .tickets
            .find_by_id(&cmd.ticket_id)
            .await?
            .ok_or_else(|| TicketError::not_found(cmd.ticket_id))?;

        ticket.apply(TicketChanges {
            title: cmd.title,
            description: cmd.description,
            status: cmd.status,
            priority: cmd.priority,
            due_date: cmd.due_date,
            assigned_user_id: cmd.assigned_user_id,
        })?;
        ensure_assignee_exists(self.users.as_ref(), ticket.assigned_user_id).await?;

        self.tickets.update(&ticket).await?;
        tracing::info!(ticket_id = %ticket.id, "Ticket updated");

        self.publisher
            .publish_ticket_updated(TicketUpdated::from_ticket(&ticket))
            .await;

        Ok(ticket)
    }
}
