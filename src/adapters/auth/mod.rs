//! Authentication adapters.
//!
//! Implementations of the `TokenService` and `PasswordHasher` ports:
//!
//! - `jwt` - HS256 tokens signed with the configured secret
//! - `argon2_hasher` - Argon2id PHC password hashes

mod argon2_hasher;
mod jwt;

pub use argon2_hasher::Argon2PasswordHasher;
pub use jwt::JwtTokenService;
