//! In-memory repositories.
//!
//! Back `memory://` database URLs and handler tests. Nothing survives a restart.

mod tickets;
mod users;

pub use tickets::InMemoryTicketRepository;
pub use users::InMemoryUserRepository;
