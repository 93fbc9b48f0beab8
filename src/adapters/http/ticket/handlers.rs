//! HTTP handlers for ticket endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::envelope::{ApiError, ApiResponse};
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::ticket::{
    ChangeTicketStatusCommand, ChangeTicketStatusHandler, CreateTicketCommand, CreateTicketHandler,
    DeleteTicketCommand, DeleteTicketHandler, ListTicketsHandler, ListTicketsQuery,
    UpdateTicketCommand, UpdateTicketHandler,
};
use crate::domain::foundation::{TicketId, Timestamp};
use crate::domain::ticket::TicketError;

use super::dto::{
    ChangeStatusRequest, CreateTicketRequest, TicketCreatedResponse, TicketResponse,
    UpdateTicketRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct TicketHandlers {
    pub create: Arc<CreateTicketHandler>,
    pub update: Arc<UpdateTicketHandler>,
    pub change_status: Arc<ChangeTicketStatusHandler>,
    pub delete: Arc<DeleteTicketHandler>,
    pub list: Arc<ListTicketsHandler>,
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/tickets - All tickets, newest first
pub async fn list_tickets(
    State(handlers): State<TicketHandlers>,
    RequireAuth(_user): RequireAuth,
) -> Response {
    match handlers.list.handle(ListTicketsQuery::default()).await {
        Ok(listings) => {
            let tickets: Vec<TicketResponse> = listings.into_iter().map(Into::into).collect();
            Json(ApiResponse::ok(tickets, "Tickets retrieved")).into_response()
        }
        Err(e) => handle_ticket_error(e),
    }
}

/// GET /api/tickets/user/:username - Tickets assigned to one user
pub async fn list_user_tickets(
    State(handlers): State<TicketHandlers>,
    RequireAuth(_user): RequireAuth,
    Path(username): Path<String>,
) -> Response {
    let query = ListTicketsQuery {
        assignee_username: Some(username),
    };
    match handlers.list.handle(query).await {
        Ok(listings) => {
            let tickets: Vec<TicketResponse> = listings.into_iter().map(Into::into).collect();
            Json(ApiResponse::ok(tickets, "Tickets retrieved")).into_response()
        }
        Err(e) => handle_ticket_error(e),
    }
}

/// POST /api/tickets - Create a ticket
pub async fn create_ticket(
    State(handlers): State<TicketHandlers>,
    RequireAuth(_user): RequireAuth,
    Json(req): Json<CreateTicketRequest>,
) -> Response {
    let cmd = CreateTicketCommand {
        title: req.title,
        description: req.description,
        status: req.status,
        priority: req.priority,
        due_date: req.due_date.map(Timestamp::from_datetime),
        assigned_user_id: req.assigned_user_id,
    };

    match handlers.create.handle(cmd).await {
        Ok(ticket) => (
            StatusCode::CREATED,
            Json(ApiResponse::ok(
                TicketCreatedResponse { ticket_id: ticket.id },
                "Ticket created successfully",
            )),
        )
            .into_response(),
        Err(e) => handle_ticket_error(e),
    }
}

/// PUT /api/tickets/:id - Replace a ticket's fields
pub async fn update_ticket(
    State(handlers): State<TicketHandlers>,
    RequireAuth(_user): RequireAuth,
    Path(ticket_id): Path<String>,
    Json(req): Json<UpdateTicketRequest>,
) -> Response {
    let ticket_id = match parse_ticket_id(&ticket_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = UpdateTicketCommand {
        ticket_id,
        title: req.title,
        description: req.description,
        status: req.status,
        priority: req.priority,
        due_date: req.due_date.map(Timestamp::from_datetime),
        assigned_user_id: req.assigned_user_id,
    };

    match handlers.update.handle(cmd).await {
        Ok(ticket) => Json(ApiResponse::ok(
            TicketResponse::from(ticket),
            "Ticket updated successfully",
        ))
        .into_response(),
        Err(e) => handle_ticket_error(e),
    }
}

/// PATCH /api/tickets/:id/status - Move a ticket
pub async fn change_ticket_status(
    State(handlers): State<TicketHandlers>,
    RequireAuth(_user): RequireAuth,
    Path(ticket_id): Path<String>,
    Json(req): Json<ChangeStatusRequest>,
) -> Response {
    let ticket_id = match parse_ticket_id(&ticket_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = ChangeTicketStatusCommand {
        ticket_id,
        status: req.status,
    };

    match handlers.change_status.handle(cmd).await {
        Ok(ticket) => Json(ApiResponse::ok(
            TicketResponse::from(ticket),
            "Ticket status updated",
        ))
        .into_response(),
        Err(e) => handle_ticket_error(e),
    }
}

/// DELETE /api/tickets/:id - Delete a ticket
pub async fn delete_ticket(
    State(handlers): State<TicketHandlers>,
    RequireAuth(_user): RequireAuth,
    Path(ticket_id): Path<String>,
) -> Response {
    let ticket_id = match parse_ticket_id(&ticket_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.delete.handle(DeleteTicketCommand { ticket_id }).await {
        Ok(()) => Json(ApiResponse::done("Ticket deleted successfully")).into_response(),
        Err(e) => handle_ticket_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn parse_ticket_id(raw: &str) -> Result<TicketId, Response> {
    raw.parse::<TicketId>()
        .map_err(|_| ApiError::bad_request("Invalid ticket ID").into_response())
}

fn handle_ticket_error(error: TicketError) -> Response {
    match error {
        TicketError::NotFound(id) => ApiError::not_found("Ticket", &id.to_string()),
        TicketError::ValidationFailed { field, message } => {
            ApiError::bad_request(format!("Validation failed for {}: {}", field, message))
        }
        TicketError::Infrastructure(msg) => ApiError::internal(msg),
    }
    .into_response()
}
