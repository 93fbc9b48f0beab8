//! HTTP routes for ticket endpoints.

use axum::{
    routing::{get, patch},
    Router,
};

use super::handlers::{
    change_ticket_status, create_ticket, delete_ticket, list_tickets, list_user_tickets,
    update_ticket, TicketHandlers,
};

/// Ticket router, mounted under `/api/tickets`.
pub fn ticket_routes(handlers: TicketHandlers) -> Router {
    Router::new()
        .route("/", get(list_tickets).post(create_ticket))
        .route("/user/:username", get(list_user_tickets))
        .route("/:id", axum::routing::put(update_ticket).delete(delete_ticket))
        .route("/:id/status", patch(change_ticket_status))
        .with_state(handlers)
}
