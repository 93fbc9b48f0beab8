//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers commit through the repositories and then hand exactly
//! one event to the `SyncPublisher`; query handlers only read.

pub mod handlers;

pub use handlers::*;
