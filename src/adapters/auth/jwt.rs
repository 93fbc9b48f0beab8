//! HS256 access tokens issued and validated locally.
//!
//! Tokens carry everything `AuthenticatedUser` needs, so authenticated
//! requests do not touch the user store. Issuer, audience and expiry are
//! always enforced.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::domain::foundation::{AuthError, AuthenticatedUser, Role, Timestamp, UserId};
use crate::domain::user::User;
use crate::ports::{IssuedToken, TokenService};

/// Claims written into every token.
#[derive(Debug, Serialize, Deserialize)]
struct AccessClaims {
    /// Subject - the user ID
    sub: String,
    name: String,
    email: String,
    role: String,
    iss: String,
    aud: String,
    /// Expiry timestamp (Unix epoch seconds)
    exp: i64,
    iat: i64,
}

/// `TokenService` backed by a shared HMAC secret.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
    expiry_days: i64,
}

impl JwtTokenService {
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.expose_secret().as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.jwt_issuer]);
        validation.set_audience(&[&config.jwt_audience]);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            issuer: config.jwt_issuer.clone(),
            audience: config.jwt_audience.clone(),
            expiry_days: i64::from(config.token_expiry_days),
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user: &User) -> Result<IssuedToken, AuthError> {
        let issued_at = Timestamp::now();
        let expires_at = issued_at.plus_days(self.expiry_days);

        let claims = AccessClaims {
            sub: user.id.to_string(),
            name: user.username.clone(),
            email: user.email.clone(),
            role: user.role.as_str().to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            exp: expires_at.unix_seconds(),
            iat: issued_at.unix_seconds(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::IssuanceFailed(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<AccessClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Token expired");
                        AuthError::TokenExpired
                    }
                    _ => {
                        tracing::debug!("Token validation failed: {}", e);
                        AuthError::InvalidToken
                    }
                }
            },
        )?;
        let claims = data.claims;

        let id: UserId = claims.sub.parse().map_err(|_| {
            tracing::warn!("Invalid user ID in token: {}", claims.sub);
            AuthError::InvalidToken
        })?;
        let role: Role = claims.role.parse()?;

        Ok(AuthenticatedUser::new(id, claims.name, claims.email, role))
    }
}

impl std::fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("expiry_days", &self.expiry_days)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: Secret::new(secret.to_string()),
            ..Default::default()
        }
    }

    fn user(role: Role) -> User {
        User::register("alice", "alice@example.com", "hash".into(), role)
    }

    #[test]
    fn issued_token_validates_to_same_user() {
        let service = JwtTokenService::new(&config("a-test-secret-that-is-long-enough!!"));
        let alice = user(Role::Admin);

        let issued = service.issue(&alice).unwrap();
        let caller = service.validate(&issued.token).unwrap();

        assert_eq!(caller.id, alice.id);
        assert_eq!(caller.username, "alice");
        assert_eq!(caller.email, "alice@example.com");
        assert!(caller.is_admin());
    }

    #[test]
    fn expiry_follows_configured_days() {
        let service = JwtTokenService::new(&config("secret"));
        let before = Timestamp::now();
        let issued = service.issue(&user(Role::User)).unwrap();
        let delta = issued.expires_at.unix_seconds() - before.unix_seconds();
        assert!((7 * 86_400..=7 * 86_400 + 5).contains(&delta));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let issuer = JwtTokenService::new(&config("secret-one"));
        let verifier = JwtTokenService::new(&config("secret-two"));
        let issued = issuer.issue(&user(Role::User)).unwrap();

        assert_eq!(verifier.validate(&issued.token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn token_for_other_audience_is_rejected() {
        let mut other = config("secret");
        other.jwt_audience = "someone-else".into();
        let issued = JwtTokenService::new(&other).issue(&user(Role::User)).unwrap();

        let service = JwtTokenService::new(&config("secret"));
        assert_eq!(service.validate(&issued.token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn expired_token_reports_expiry() {
        let cfg = config("secret");
        let service = JwtTokenService::new(&cfg);
        let now = Timestamp::now().unix_seconds();
        let claims = AccessClaims {
            sub: UserId::new().to_string(),
            name: "alice".into(),
            email: "alice@example.com".into(),
            role: "User".into(),
            iss: cfg.jwt_issuer.clone(),
            aud: cfg.jwt_audience.clone(),
            exp: now - 3_600,
            iat: now - 7_200,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        assert_eq!(service.validate(&token), Err(AuthError::TokenExpired));
    }

    #[test]
    fn garbage_is_invalid() {
        let service = JwtTokenService::new(&config("secret"));
        assert_eq!(service.validate("not-a-jwt"), Err(AuthError::InvalidToken));
    }
}
