//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure:
//! - `user` - `/api/auth` and `/api/users`
//! - `ticket` - `/api/tickets`
//!
//! `router` assembles them behind the shared middleware stack.

pub mod envelope;
pub mod middleware;
pub mod router;
pub mod ticket;
pub mod user;

pub use envelope::{ApiError, ApiResponse, PagedResponse};
pub use router::{build_router, AppServices};
