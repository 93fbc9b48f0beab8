//! Access token port.
//!
//! Issues tokens at login and validates the `Authorization: Bearer` header
//! on every authenticated request.

use crate::domain::foundation::{AuthError, AuthenticatedUser, Timestamp};
use crate::domain::user::User;

/// A freshly issued access token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: Timestamp,
}

/// Issues and validates access tokens.
///
/// Implementations must validate signature, issuer, audience and expiry,
/// returning `AuthError::TokenExpired` for expired tokens and
/// `AuthError::InvalidToken` for everything else.
pub trait TokenService: Send + Sync {
    fn issue(&self, user: &User) -> Result<IssuedToken, AuthError>;

    fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_service_is_object_safe() {
        fn _accepts_dyn(_service: &dyn TokenService) {}
    }
}
