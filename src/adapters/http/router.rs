//! Router assembly - wires application handlers into the axum API.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::application::handlers::ticket::{
    ChangeTicketStatusHandler, CreateTicketHandler, DeleteTicketHandler, ListTicketsHandler,
    UpdateTicketHandler,
};
use crate::application::handlers::user::{
    ChangePasswordHandler, GetAvatarHandler, GetCurrentUserHandler, ListTicketUsersHandler,
    ListUsersHandler, LoginUserHandler, RegisterUserHandler, SetLoginAllowedHandler,
    UpdateProfileHandler, UploadAvatarHandler,
};
use crate::config::ServerConfig;
use crate::domain::user::MAX_AVATAR_BYTES;
use crate::ports::{PasswordHasher, SyncPublisher, TicketRepository, TokenService, UserRepository};

use super::envelope::ApiResponse;
use super::middleware::auth_middleware;
use super::ticket::{ticket_routes, TicketHandlers};
use super::user::{auth_routes, user_routes, AccountHandlers, UserHandlers};

/// Room for multipart framing around the largest accepted avatar.
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

/// Port implementations the API is built from.
#[derive(Clone)]
pub struct AppServices {
    pub tickets: Arc<dyn TicketRepository>,
    pub users: Arc<dyn UserRepository>,
    pub publisher: Arc<dyn SyncPublisher>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub tokens: Arc<dyn TokenService>,
}

impl AppServices {
    fn ticket_handlers(&self) -> TicketHandlers {
        TicketHandlers {
            create: Arc::new(CreateTicketHandler::new(
                self.tickets.clone(),
                self.users.clone(),
                self.publisher.clone(),
            )),
            update: Arc::new(UpdateTicketHandler::new(
                self.tickets.clone(),
                self.users.clone(),
                self.publisher.clone(),
            )),
            change_status: Arc::new(ChangeTicketStatusHandler::new(
                self.tickets.clone(),
                self.publisher.clone(),
            )),
            delete: Arc::new(DeleteTicketHandler::new(
                self.tickets.clone(),
                self.publisher.clone(),
            )),
            list: Arc::new(ListTicketsHandler::new(self.tickets.clone())),
        }
    }

    fn account_handlers(&self) -> AccountHandlers {
        AccountHandlers {
            register: Arc::new(RegisterUserHandler::new(
                self.users.clone(),
                self.hasher.clone(),
                self.publisher.clone(),
            )),
            login: Arc::new(LoginUserHandler::new(
                self.users.clone(),
                self.hasher.clone(),
                self.tokens.clone(),
            )),
        }
    }

    fn user_handlers(&self) -> UserHandlers {
        UserHandlers {
            current: Arc::new(GetCurrentUserHandler::new(self.users.clone())),
            update_profile: Arc::new(UpdateProfileHandler::new(self.users.clone())),
            change_password: Arc::new(ChangePasswordHandler::new(
                self.users.clone(),
                self.hasher.clone(),
            )),
            upload_avatar: Arc::new(UploadAvatarHandler::new(
                self.users.clone(),
                self.publisher.clone(),
            )),
            get_avatar: Arc::new(GetAvatarHandler::new(self.users.clone())),
            list: Arc::new(ListUsersHandler::new(self.users.clone())),
            ticket_users: Arc::new(ListTicketUsersHandler::new(self.users.clone())),
            set_login_allowed: Arc::new(SetLoginAllowedHandler::new(self.users.clone())),
        }
    }
}

/// Builds the full API router with middleware applied.
pub fn build_router(services: AppServices, config: &ServerConfig) -> Router {
    let api = Router::new()
        .nest("/auth", auth_routes(services.account_handlers()))
        .nest("/users", user_routes(services.user_handlers()))
        .nest("/tickets", ticket_routes(services.ticket_handlers()));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(from_fn_with_state(services.tokens.clone(), auth_middleware))
        .layer(DefaultBodyLimit::max(MAX_AVATAR_BYTES + MULTIPART_OVERHEAD))
        .layer(cors_layer(config))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::ok(json!({ "status": "ok" }), "Healthy"))
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins = config.cors_origins_list();
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(parsed)
}
