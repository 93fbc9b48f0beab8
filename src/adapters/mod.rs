//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `sync` - outbound mirroring to the remote ticket service (reqwest)
//! - `postgres` - repositories backed by PostgreSQL (sqlx)
//! - `in_memory` - repositories for tests and `memory://` runs
//! - `auth` - JWT issuance and argon2 password hashing
//! - `http` - the axum REST API

pub mod auth;
pub mod http;
pub mod in_memory;
pub mod postgres;
pub mod sync;
