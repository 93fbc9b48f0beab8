//! Ticket command and query handlers.
//!
//! Every command commits locally first and then publishes exactly one
//! sync event. Failed commands publish nothing.

mod change_ticket_status;
mod create_ticket;
mod delete_ticket;
mod list_tickets;
mod update_ticket;

pub use change_ticket_status::{ChangeTicketStatusCommand, ChangeTicketStatusHandler};
pub use create_ticket::{CreateTicketCommand, CreateTicketHandler};
pub use delete_ticket::{DeleteTicketCommand, DeleteTicketHandler};
pub use list_tickets::{ListTicketsHandler, ListTicketsQuery};
pub use update_ticket::{UpdateTicketCommand, UpdateTicketHandler};

use crate::domain::foundation::UserId;
use crate::domain::ticket::TicketError;
use crate::ports::UserRepository;

/// Rejects assignment to a user that does not exist.
async fn ensure_assignee_exists(
    users: &dyn UserRepository,
    assignee: Option<UserId>,
) -> Result<(), TicketError> {
    if let Some(id) = assignee {
        if users.find_by_id(&id).await?.is_none() {
            return Err(TicketError::validation(
                "assignedUserId",
                format!("Assigned user does not exist: {}", id),
            ));
        }
    }
    Ok(())
}
