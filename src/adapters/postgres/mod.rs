//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresUserRepository` - accounts, profiles and avatar bytes
//! - `PostgresTicketRepository` - tickets and assignee-joined listings

mod ticket_repository;
mod user_repository;

pub use ticket_repository::PostgresTicketRepository;
pub use user_repository::PostgresUserRepository;
