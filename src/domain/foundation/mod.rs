//! Foundation module - Shared domain primitives.
//!
//! Identifiers, timestamps, auth types and the error vocabulary used by
//! the ticket, user and sync modules.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser, Role};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{TicketId, UserId};
pub use timestamp::Timestamp;
