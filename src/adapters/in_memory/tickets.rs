//! In-memory implementation of TicketRepository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::InMemoryUserRepository;
use crate::domain::foundation::{DomainError, ErrorCode, TicketId};
use crate::domain::ticket::Ticket;
use crate::ports::{AssigneeSummary, TicketListing, TicketRepository};

/// Tickets held in process memory.
///
/// Shares the user store so listings can carry the assignee's username,
/// matching the join the Postgres adapter performs.
#[derive(Debug)]
pub struct InMemoryTicketRepository {
    tickets: RwLock<HashMap<TicketId, Ticket>>,
    users: Arc<InMemoryUserRepository>,
}

impl InMemoryTicketRepository {
    pub fn new(users: Arc<InMemoryUserRepository>) -> Self {
        Self {
            tickets: RwLock::new(HashMap::new()),
            users,
        }
    }

    async fn to_listing(&self, ticket: Ticket) -> TicketListing {
        let assignee = match ticket.assigned_user_id {
            Some(id) => self
                .users
                .username_of(&id)
                .await
                .map(|username| AssigneeSummary { id, username }),
            None => None,
        };
        TicketListing { ticket, assignee }
    }

    async fn listings(&self, mut tickets: Vec<Ticket>) -> Vec<TicketListing> {
        tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        let mut listings = Vec::with_capacity(tickets.len());
        for ticket in tickets {
            listings.push(self.to_listing(ticket).await);
        }
        listings
    }
}

#[async_trait]
impl TicketRepository for InMemoryTicketRepository {
    async fn save(&self, ticket: &Ticket) -> Result<(), DomainError> {
        self.tickets.write().await.insert(ticket.id, ticket.clone());
        Ok(())
    }

    async fn update(&self, ticket: &Ticket) -> Result<(), DomainError> {
        let mut tickets = self.tickets.write().await;
        match tickets.get_mut(&ticket.id) {
            Some(existing) => {
                *existing = ticket.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::TicketNotFound,
                format!("Ticket not found: {}", ticket.id),
            )),
        }
    }

    async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>, DomainError> {
        Ok(self.tickets.read().await.get(id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<TicketListing>, DomainError> {
        let tickets: Vec<Ticket> = self.tickets.read().await.values().cloned().collect();
        Ok(self.listings(tickets).await)
    }

    async fn list_by_assignee(&self, username: &str) -> Result<Vec<TicketListing>, DomainError> {
        let listings = self.list_all().await?;
        Ok(listings
            .into_iter()
            .filter(|l| {
                l.assignee
                    .as_ref()
                    .is_some_and(|a| a.username.eq_ignore_ascii_case(username.trim()))
            })
            .collect())
    }

    async fn delete(&self, id: &TicketId) -> Result<bool, DomainError> {
        Ok(self.tickets.write().await.remove(id).is_some())
    }
}
