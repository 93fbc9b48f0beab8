//! DTOs for ticket endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{TicketId, UserId};
use crate::domain::ticket::Ticket;
use crate::ports::{AssigneeSummary, TicketListing};

// ════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub assigned_user_id: Option<UserId>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTicketRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub assigned_user_id: Option<UserId>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangeStatusRequest {
    pub status: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketCreatedResponse {
    pub ticket_id: TicketId,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssigneeResponse {
    pub id: UserId,
    pub username: String,
}

impl From<AssigneeSummary> for AssigneeResponse {
    fn from(summary: AssigneeSummary) -> Self {
        Self {
            id: summary.id,
            username: summary.username,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketResponse {
    pub id: TicketId,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub due_date: Option<DateTime<Utc>>,
    pub assigned_user_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_user: Option<AssigneeResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Ticket> for TicketResponse {
    fn from(ticket: Ticket) -> Self {
        Self {
            id: ticket.id,
            title: ticket.title,
            description: ticket.description,
            status: ticket.status,
            priority: ticket.priority,
            due_date: ticket.due_date.map(|d| *d.as_datetime()),
            assigned_user_id: ticket.assigned_user_id,
            assigned_user: None,
            created_at: *ticket.created_at.as_datetime(),
            updated_at: *ticket.updated_at.as_datetime(),
        }
    }
}

impl From<TicketListing> for TicketResponse {
    fn from(listing: TicketListing) -> Self {
        let mut response = TicketResponse::from(listing.ticket);
        response.assigned_user = listing.assignee.map(AssigneeResponse::from);
        response
    }
}
