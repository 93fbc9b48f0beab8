//! ListTicketsHandler - Query handler for the ticket board.

use std::sync::Arc;

use crate::domain::ticket::TicketError;
use crate::ports::{TicketListing, TicketRepository};

/// Query for tickets, optionally restricted to one assignee.
#[derive(Debug, Clone, Default)]
pub struct ListTicketsQuery {
    pub assignee_username: Option<String>,
}

/// Handler for listing tickets.
pub struct ListTicketsHandler {
    tickets: Arc<dyn TicketRepository>,
}

impl ListTicketsHandler {
    pub fn new(tickets: Arc<dyn TicketRepository>) -> Self {
        Self { tickets }
    }

    pub async fn handle(&self, query: ListTicketsQuery) -> Result<Vec<TicketListing>, TicketError> {
        let listings = match query.assignee_username.as_deref() {
            Some(username) => self.tickets.list_by_assignee(username).await?,
            None => self.tickets.list_all().await?,
        };
        Ok(listings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::in_memory::{InMemoryTicketRepository, InMemoryUserRepository};
    use crate::domain::foundation::Role;
    use crate::domain::ticket::{NewTicket, Ticket};
    use crate::domain::user::User;
    use crate::ports::UserRepository;

    #[tokio::test]
    async fn lists_all_or_by_assignee() {
        let users = Arc::new(InMemoryUserRepository::new());
        let bob = User::register("bob", "bob@example.com", "hash".into(), Role::User);
        users.save(&bob).await.unwrap();
        let tickets = Arc::new(InMemoryTicketRepository::new(users));

        for (title, assignee) in [("Bob's ticket", Some(bob.id)), ("Nobody's ticket", None)] {
            let ticket = Ticket::create(NewTicket {
                title: title.into(),
                assigned_user_id: assignee,
                ..Default::default()
            })
            .unwrap();
            tickets.save(&ticket).await.unwrap();
        }

        let handler = ListTicketsHandler::new(tickets);
        assert_eq!(handler.handle(ListTicketsQuery::default()).await.unwrap().len(), 2);

        let bobs = handler
            .handle(ListTicketsQuery {
                assignee_username: Some("bob".into()),
            })
            .await
            .unwrap();
        assert_eq!(bobs.len(), 1);
        assert_eq!(bobs[0].ticket.title, "Bob's ticket");
    }
}
