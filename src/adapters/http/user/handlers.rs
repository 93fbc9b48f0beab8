//! HTTP handlers for account and user endpoints.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::envelope::{ApiError, ApiResponse, PagedResponse};
use crate::adapters::http::middleware::{RequireAdmin, RequireAuth};
use crate::application::handlers::user::{
    ChangePasswordCommand, ChangePasswordHandler, GetAvatarHandler, GetCurrentUserHandler,
    ListTicketUsersHandler, ListUsersHandler, LoginUserCommand, LoginUserHandler,
    RegisterUserCommand, RegisterUserHandler, SetLoginAllowedCommand, SetLoginAllowedHandler,
    UpdateProfileCommand, UpdateProfileHandler, UploadAvatarCommand, UploadAvatarHandler,
};
use crate::domain::foundation::UserId;
use crate::domain::user::UserError;
use crate::ports::UserPageQuery;

use super::dto::{
    ChangePasswordRequest, ListUsersParams, LoginRequest, LoginResponse, RegisterRequest,
    TicketUserResponse, ToggleLoginRequest, UpdateProfileRequest, UserResponse,
};

const AVATAR_FIELD: &str = "file";
const MAX_REQUESTED_PAGE_SIZE: i64 = 100;

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct AccountHandlers {
    pub register: Arc<RegisterUserHandler>,
    pub login: Arc<LoginUserHandler>,
}

#[derive(Clone)]
pub struct UserHandlers {
    pub current: Arc<GetCurrentUserHandler>,
    pub update_profile: Arc<UpdateProfileHandler>,
    pub change_password: Arc<ChangePasswordHandler>,
    pub upload_avatar: Arc<UploadAvatarHandler>,
    pub get_avatar: Arc<GetAvatarHandler>,
    pub list: Arc<ListUsersHandler>,
    pub ticket_users: Arc<ListTicketUsersHandler>,
    pub set_login_allowed: Arc<SetLoginAllowedHandler>,
}

// ════════════════════════════════════════════════════════════════════════════
// Account handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/auth/register - Create an account
pub async fn register(
    State(handlers): State<AccountHandlers>,
    Json(req): Json<RegisterRequest>,
) -> Response {
    let cmd = RegisterUserCommand {
        username: req.username,
        email: req.email,
        password: req.password,
    };

    match handlers.register.handle(cmd).await {
        Ok(user) => (
            StatusCode::CREATED,
            Json(ApiResponse::ok(
                UserResponse::from(user),
                "User registered successfully",
            )),
        )
            .into_response(),
        Err(e) => handle_user_error(e),
    }
}

/// POST /api/auth/login - Exchange credentials for an access token
pub async fn login(
    State(handlers): State<AccountHandlers>,
    Json(req): Json<LoginRequest>,
) -> Response {
    let cmd = LoginUserCommand {
        email: req.email,
        password: req.password,
    };

    match handlers.login.handle(cmd).await {
        Ok(result) => Json(ApiResponse::ok(
            LoginResponse::new(result.token, result.user),
            "Login successful",
        ))
        .into_response(),
        Err(e) => handle_user_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Current user handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/users/me
pub async fn get_me(
    State(handlers): State<UserHandlers>,
    RequireAuth(caller): RequireAuth,
) -> Response {
    match handlers.current.handle(caller.id).await {
        Ok(user) => Json(ApiResponse::ok(UserResponse::from(user), "User retrieved")).into_response(),
        Err(e) => handle_user_error(e),
    }
}

/// PUT /api/users/me
pub async fn update_me(
    State(handlers): State<UserHandlers>,
    RequireAuth(caller): RequireAuth,
    Json(req): Json<UpdateProfileRequest>,
) -> Response {
    let cmd = UpdateProfileCommand {
        user_id: caller.id,
        username: req.username,
        email: req.email,
        phone_number: req.phone_number,
        address: req.address,
    };

    match handlers.update_profile.handle(cmd).await {
        Ok(user) => Json(ApiResponse::ok(
            UserResponse::from(user),
            "Profile updated successfully",
        ))
        .into_response(),
        Err(e) => handle_user_error(e),
    }
}

/// POST /api/users/me/change-password
pub async fn change_password(
    State(handlers): State<UserHandlers>,
    RequireAuth(caller): RequireAuth,
    Json(req): Json<ChangePasswordRequest>,
) -> Response {
    let cmd = ChangePasswordCommand {
        user_id: caller.id,
        current_password: req.current_password,
        new_password: req.new_password,
        confirm_new_password: req.confirm_new_password,
    };

    match handlers.change_password.handle(cmd).await {
        Ok(()) => Json(ApiResponse::done("Password changed successfully")).into_response(),
        Err(e) => handle_user_error(e),
    }
}

/// POST /api/users/me/avatar - multipart upload, field `file`
pub async fn upload_avatar(
    State(handlers): State<UserHandlers>,
    RequireAuth(caller): RequireAuth,
    mut multipart: Multipart,
) -> Response {
    let mut upload = None;
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return ApiError::bad_request(e.body_text()).into_response(),
        };
        if field.name() != Some(AVATAR_FIELD) {
            continue;
        }
        let mime_type = field.content_type().unwrap_or_default().to_string();
        match field.bytes().await {
            Ok(bytes) => upload = Some((bytes.to_vec(), mime_type)),
            Err(e) => return ApiError::bad_request(e.body_text()).into_response(),
        }
        break;
    }

    let Some((bytes, mime_type)) = upload else {
        return ApiError::bad_request("No file uploaded").into_response();
    };

    let cmd = UploadAvatarCommand {
        user_id: caller.id,
        bytes,
        mime_type,
    };

    match handlers.upload_avatar.handle(cmd).await {
        Ok(()) => Json(ApiResponse::done("Avatar uploaded successfully")).into_response(),
        Err(e) => handle_user_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Directory handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/users/:id/avatar - raw image bytes, no auth
pub async fn get_avatar(
    State(handlers): State<UserHandlers>,
    Path(user_id): Path<String>,
) -> Response {
    let user_id = match parse_user_id(&user_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.get_avatar.handle(user_id).await {
        Ok(avatar) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, avatar.mime_type)],
            avatar.data,
        )
            .into_response(),
        Err(e) => handle_user_error(e),
    }
}

/// GET /api/users?pageNumber&pageSize&searchTerm
pub async fn list_users(
    State(handlers): State<UserHandlers>,
    RequireAuth(_caller): RequireAuth,
    Query(params): Query<ListUsersParams>,
) -> Response {
    if params.page_size.is_some_and(|size| size > MAX_REQUESTED_PAGE_SIZE) {
        return ApiError::bad_request(format!(
            "pageSize must not exceed {}",
            MAX_REQUESTED_PAGE_SIZE
        ))
        .into_response();
    }

    let query = UserPageQuery::new(
        params.page_number.unwrap_or(1),
        params.page_size.unwrap_or(0),
        params.search_term,
    );
    let (page_number, page_size) = (query.page_number, query.page_size);

    match handlers.list.handle(query).await {
        Ok(page) => {
            let items: Vec<UserResponse> = page.items.into_iter().map(Into::into).collect();
            let paged = PagedResponse::new(items, page_number, page_size, page.total_records);
            Json(ApiResponse::ok(paged, "Users retrieved")).into_response()
        }
        Err(e) => handle_user_error(e),
    }
}

/// GET /api/users/ticket-users - `{id, username}` pairs for assignment
pub async fn list_ticket_users(
    State(handlers): State<UserHandlers>,
    RequireAuth(_caller): RequireAuth,
) -> Response {
    match handlers.ticket_users.handle().await {
        Ok(users) => {
            let users: Vec<TicketUserResponse> = users.into_iter().map(Into::into).collect();
            Json(ApiResponse::ok(users, "Users retrieved")).into_response()
        }
        Err(e) => handle_user_error(e),
    }
}

/// POST /api/users/:id/toggle-login - admin only
pub async fn toggle_login(
    State(handlers): State<UserHandlers>,
    RequireAdmin(actor): RequireAdmin,
    Path(user_id): Path<String>,
    Json(req): Json<ToggleLoginRequest>,
) -> Response {
    let user_id = match parse_user_id(&user_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = SetLoginAllowedCommand {
        actor,
        user_id,
        is_allowed: req.is_allowed,
    };

    match handlers.set_login_allowed.handle(cmd).await {
        Ok(user) => {
            let message = if user.is_login_allowed {
                "Login enabled"
            } else {
                "Login disabled"
            };
            Json(ApiResponse::ok(UserResponse::from(user), message)).into_response()
        }
        Err(e) => handle_user_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn parse_user_id(raw: &str) -> Result<UserId, Response> {
    raw.parse::<UserId>()
        .map_err(|_| ApiError::bad_request("Invalid user ID").into_response())
}

fn handle_user_error(error: UserError) -> Response {
    match error {
        UserError::UsernameTaken | UserError::EmailTaken => ApiError::conflict(error.message()),
        UserError::InvalidCredentials => ApiError::unauthorized(error.message()),
        UserError::LoginDisabled | UserError::Forbidden => ApiError::forbidden(error.message()),
        UserError::NotFound(id) => ApiError::not_found("User", &id.to_string()),
        UserError::AvatarNotFound(id) => ApiError::not_found("Avatar", &id.to_string()),
        UserError::ValidationFailed { field, message } => {
            ApiError::bad_request(format!("Validation failed for {}: {}", field, message))
        }
        UserError::Infrastructure(msg) => ApiError::internal(msg),
    }
    .into_response()
}
