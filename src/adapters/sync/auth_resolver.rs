//! Credential resolution for outbound sync calls.
//!
//! Two mutually exclusive strategies, chosen only by whether an integration
//! key is configured:
//!
//! - **Integration key**: sent as `X-Integration-Key`, no round-trip.
//! - **Bearer**: cached token, else the static token from config, else a
//!   login against the remote `/api/auth/login`. The token is cached for
//!   the lifetime of the resolver.
//!
//! The token lives behind a `tokio::sync::RwLock` that is only ever held for
//! a read or a swap. Logins are serialized by a separate mutex, so concurrent
//! publishes never log in twice while readers never wait on the network.

use reqwest::RequestBuilder;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::{Mutex, RwLock};

use crate::config::SyncConfig;
use crate::domain::sync::{AuthMode, SyncFailure};

/// Header carrying the integration key.
pub const INTEGRATION_KEY_HEADER: &str = "X-Integration-Key";

const LOGIN_PATH: &str = "/api/auth/login";
const TOKEN_FIELDS: [&str; 4] = ["accessToken", "AccessToken", "access_token", "token"];

/// A credential ready to be attached to a request.
#[derive(Clone)]
pub enum SyncCredential {
    IntegrationKey(Secret<String>),
    Bearer(Secret<String>),
}

impl SyncCredential {
    pub fn mode(&self) -> AuthMode {
        match self {
            SyncCredential::IntegrationKey(_) => AuthMode::IntegrationKey,
            SyncCredential::Bearer(_) => AuthMode::Bearer,
        }
    }

    pub fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            SyncCredential::IntegrationKey(key) => {
                request.header(INTEGRATION_KEY_HEADER, key.expose_secret().as_str())
            }
            SyncCredential::Bearer(token) => request.bearer_auth(token.expose_secret()),
        }
    }
}

impl std::fmt::Debug for SyncCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SyncCredential::{:?}([REDACTED])", self.mode())
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Resolves the credential for each publish attempt and owns the token cache.
pub struct SyncAuthResolver {
    client: reqwest::Client,
    login_url: String,
    integration_key: Option<Secret<String>>,
    static_token: Option<Secret<String>>,
    credentials: Option<(String, Secret<String>)>,
    cached_token: RwLock<Option<Secret<String>>>,
    login_gate: Mutex<()>,
}

impl SyncAuthResolver {
    /// Builds a resolver for the remote at `base_url` (already trimmed).
    pub fn new(client: reqwest::Client, base_url: &str, config: &SyncConfig) -> Self {
        Self {
            client,
            login_url: format!("{}{}", base_url, LOGIN_PATH),
            integration_key: config.integration_key().cloned(),
            static_token: config.bearer_token().cloned(),
            credentials: config
                .credentials()
                .map(|(email, password)| (email.to_string(), password.clone())),
            cached_token: RwLock::new(None),
            login_gate: Mutex::new(()),
        }
    }

    /// Strategy in effect. Fixed for the resolver's lifetime.
    pub fn mode(&self) -> AuthMode {
        if self.integration_key.is_some() {
            AuthMode::IntegrationKey
        } else {
            AuthMode::Bearer
        }
    }

    /// Credential for a ticket or avatar call.
    ///
    /// # Errors
    ///
    /// Fails closed when no key is configured and no bearer token can be
    /// cached, read from config, or obtained by logging in.
    pub async fn resolve(&self) -> Result<SyncCredential, SyncFailure> {
        if let Some(key) = &self.integration_key {
            return Ok(SyncCredential::IntegrationKey(key.clone()));
        }

        if let Some(token) = self.cached().await {
            return Ok(SyncCredential::Bearer(token));
        }

        let _gate = self.login_gate.lock().await;
        // Another publish may have logged in while we waited.
        if let Some(token) = self.cached().await {
            return Ok(SyncCredential::Bearer(token));
        }

        let token = match &self.static_token {
            Some(token) => token.clone(),
            None => self.login().await?,
        };
        *self.cached_token.write().await = Some(token.clone());
        Ok(SyncCredential::Bearer(token))
    }

    /// Bearer token that is available without a network call, if any.
    ///
    /// Used for user registration, which never triggers a login and does not
    /// wait for one that is in flight.
    pub async fn existing_bearer(&self) -> Option<SyncCredential> {
        self.cached()
            .await
            .or_else(|| self.static_token.clone())
            .map(SyncCredential::Bearer)
    }

    /// Drops the cached token so the next bearer call resolves afresh.
    pub async fn invalidate(&self) {
        if self.cached_token.write().await.take().is_some() {
            tracing::info!("Cleared cached sync bearer token");
        }
    }

    async fn cached(&self) -> Option<Secret<String>> {
        self.cached_token.read().await.clone()
    }

    #[cfg(test)]
    async fn has_cached_token(&self) -> bool {
        self.cached_token.read().await.is_some()
    }

    async fn login(&self) -> Result<Secret<String>, SyncFailure> {
        let (email, password) = self.credentials.as_ref().ok_or_else(|| {
            SyncFailure::auth_unresolvable(
                "set sync.integration_key, sync.bearer_token or sync.email/sync.password",
            )
        })?;

        tracing::debug!(target_url = %self.login_url, "Logging in to remote ticket service");

        let response = self
            .client
            .post(&self.login_url)
            .json(&LoginRequest {
                email,
                password: password.expose_secret(),
            })
            .send()
            .await
            .map_err(|e| SyncFailure::transport(format!("login request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncFailure::rejected(
                status.as_u16(),
                format!("login {}", status.canonical_reason().unwrap_or("failed")),
            ));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SyncFailure::malformed(format!("login body is not JSON: {}", e)))?;

        extract_token(&body)
            .map(Secret::new)
            .ok_or_else(|| SyncFailure::malformed("login response has no access token"))
    }
}

/// Reads the access token from a login response, at the top level or inside
/// a `data` envelope.
fn extract_token(body: &Value) -> Option<String> {
    let from = |obj: &Value| {
        TOKEN_FIELDS.iter().find_map(|field| {
            obj.get(field)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
        })
    };
    from(body).or_else(|| body.get("data").and_then(from))
}

impl std::fmt::Debug for SyncAuthResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncAuthResolver")
            .field("login_url", &self.login_url)
            .field("mode", &self.mode())
            .finish_non_exhaustive()
    }
}
