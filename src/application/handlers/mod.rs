//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod ticket;
pub mod user;

pub use ticket::{
    ChangeTicketStatusCommand, ChangeTicketStatusHandler, CreateTicketCommand, CreateTicketHandler,
    DeleteTicketCommand, DeleteTicketHandler, ListTicketsHandler, ListTicketsQuery,
    UpdateTicketCommand, UpdateTicketHandler,
};
pub use user::{
    ChangePasswordCommand, ChangePasswordHandler, GetAvatarHandler, GetCurrentUserHandler,
    ListTicketUsersHandler, ListUsersHandler, LoginResult, LoginUserCommand, LoginUserHandler,
    RegisterUserCommand, RegisterUserHandler, SetLoginAllowedCommand, SetLoginAllowedHandler,
    UpdateProfileCommand, UpdateProfileHandler, UploadAvatarCommand, UploadAvatarHandler,
};
