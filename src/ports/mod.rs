//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `TicketRepository` / `UserRepository` - persistence
//! - `SyncPublisher` - best-effort mirroring to the remote ticket service
//! - `PasswordHasher` - credential storage
//! - `TokenService` - access token issuance and validation

mod password_hasher;
mod sync_publisher;
mod ticket_repository;
mod token_service;
mod user_repository;

pub use password_hasher::PasswordHasher;
pub use sync_publisher::SyncPublisher;
pub use ticket_repository::{AssigneeSummary, TicketListing, TicketRepository};
pub use token_service::{IssuedToken, TokenService};
pub use user_repository::{UserPage, UserPageQuery, UserRepository};
