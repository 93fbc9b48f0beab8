//! Authentication configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

const MIN_SECRET_LEN: usize = 32;

/// Authentication configuration (locally issued JWTs)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret for signing access tokens
    pub jwt_secret: Secret<String>,

    /// `iss` claim written into and required from tokens
    #[serde(default = "default_issuer")]
    pub jwt_issuer: String,

    /// `aud` claim written into and required from tokens
    #[serde(default = "default_audience")]
    pub jwt_audience: String,

    /// Lifetime of issued tokens in days
    #[serde(default = "default_token_expiry_days")]
    pub token_expiry_days: u32,
}

impl AuthConfig {
    /// Get token lifetime as Duration
    pub fn token_expiry(&self) -> Duration {
        Duration::from_secs(u64::from(self.token_expiry_days) * 24 * 60 * 60)
    }

    /// Validate authentication configuration
    ///
    /// The secret is always required. Production also enforces a minimum length.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if *environment == Environment::Production && secret.len() < MIN_SECRET_LEN {
            return Err(ValidationError::JwtSecretTooShort);
        }
        if self.token_expiry_days == 0 || self.token_expiry_days > 365 {
            return Err(ValidationError::InvalidTokenExpiry);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: Secret::new(String::new()),
            jwt_issuer: default_issuer(),
            jwt_audience: default_audience(),
            token_expiry_days: default_token_expiry_days(),
        }
    }
}

fn default_issuer() -> String {
    "ticket-desk".to_string()
}

fn default_audience() -> String {
    "ticket-desk-api".to_string()
}

fn default_token_expiry_days() -> u32 {
    7
}
