//! ChangeTicketStatusHandler - Command handler for moving a ticket between columns.

use std::sync::Arc;

use crate::domain::foundation::TicketId;
use crate::domain::sync::TicketStatusChanged;
use crate::domain::ticket::{Ticket, TicketError};
use crate::ports::{SyncPublisher, TicketRepository};

/// Command to move a ticket to another internal status.
#[derive(Debug, Clone)]
pub struct ChangeTicketStatusCommand {
    pub ticket_id: TicketId,
    pub status: String,
}

/// Handler for status changes.
pub struct ChangeTicketStatusHandler {
    tickets: Arc<dyn TicketRepository>,
    publisher: Arc<dyn SyncPublisher>,
}

impl ChangeTicketStatusHandler {
    pub fn new(tickets: Arc<dyn TicketRepository>, publisher: Arc<dyn SyncPublisher>) -> Self {
        Self { tickets, publisher }
    }

    pub async fn handle(&self, cmd: ChangeTicketStatusCommand) -> Result<Ticket, TicketError> {
        let mut ticket = self
            .tickets
            .find_by_id(&cmd.ticket_id)
            .await?
            .ok_or_else(|| TicketError::not_found(cmd.ticket_id))?;

        ticket.move_to(&cmd.status)?;
        self.tickets.update(&ticket).await?;
        tracing::info!(ticket_id = %ticket.id, status = %ticket.status, "Ticket moved");

        self.publisher
            .publish_ticket_status_changed(TicketStatusChanged::new(ticket.id, &ticket.status))
            .await;

        Ok(ticket)
    }
}
