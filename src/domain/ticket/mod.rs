//! Ticket module - the tickets tracked by the desk.

mod aggregate;
mod errors;

pub use aggregate::{NewTicket, Ticket, TicketChanges, DEFAULT_PRIORITY, DEFAULT_STATUS};
pub use errors::TicketError;
