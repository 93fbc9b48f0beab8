//! HTTP adapter for accounts (`/api/auth`) and users (`/api/users`).

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ChangePasswordRequest, ListUsersParams, LoginRequest, LoginResponse, RegisterRequest,
    TicketUserResponse, ToggleLoginRequest, UpdateProfileRequest, UserResponse,
};
pub use handlers::{AccountHandlers, UserHandlers};
pub use routes::{auth_routes, user_routes};
