//! HTTP routes for account and user endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    change_password, get_avatar, get_me, list_ticket_users, list_users, login, register,
    toggle_login, update_me, upload_avatar, AccountHandlers, UserHandlers,
};

/// Account router, mounted under `/api/auth`.
pub fn auth_routes(handlers: AccountHandlers) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .with_state(handlers)
}

/// User router, mounted under `/api/users`.
pub fn user_routes(handlers: UserHandlers) -> Router {
    Router::new()
        .route("/", get(list_users))
        .route("/me", get(get_me).put(update_me))
        .route("/me/change-password", post(change_password))
        .route("/me/avatar", post(upload_avatar))
        .route("/ticket-users", get(list_ticket_users))
        .route("/:id/avatar", get(get_avatar))
        .route("/:id/toggle-login", post(toggle_login))
        .with_state(handlers)
}
