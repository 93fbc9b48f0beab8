//! Ticket repository port.
//!
//! Persists `Ticket` aggregates and serves the two list views of the API,
//! which need the assignee's username alongside each ticket.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, TicketId, UserId};
use crate::domain::ticket::Ticket;

/// Minimal projection of the assigned user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssigneeSummary {
    pub id: UserId,
    pub username: String,
}

/// A ticket joined with its assignee, as listed by the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketListing {
    pub ticket: Ticket,
    pub assignee: Option<AssigneeSummary>,
}

/// Repository port for Ticket persistence.
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Save a new ticket.
    async fn save(&self, ticket: &Ticket) -> Result<(), DomainError>;

    /// Update an existing ticket.
    ///
    /// # Errors
    ///
    /// - `TicketNotFound` if the ticket doesn't exist
    async fn update(&self, ticket: &Ticket) -> Result<(), DomainError>;

    /// Find a ticket by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>, DomainError>;

    /// All tickets, newest first.
    async fn list_all(&self) -> Result<Vec<TicketListing>, DomainError>;

    /// Tickets assigned to the user with this username, newest first.
    async fn list_by_assignee(&self, username: &str) -> Result<Vec<TicketListing>, DomainError>;

    /// Delete a ticket.
    ///
    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: &TicketId) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn TicketRepository) {}
    }
}
