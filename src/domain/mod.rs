//! Domain layer - pure business logic with no infrastructure dependencies.

pub mod foundation;
pub mod sync;
pub mod ticket;
pub mod user;
