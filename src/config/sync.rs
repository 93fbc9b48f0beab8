//! Remote sync configuration
//!
//! Everything here is optional. Without a base URL the whole sync
//! subsystem is disabled; without usable credentials individual publish
//! attempts are skipped and logged.

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// How publish calls are scheduled relative to the originating request.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    /// Awaited inside the request before the response is written.
    #[default]
    Inline,
    /// Spawned onto the runtime; the request does not wait.
    Detached,
}

/// Remote ticket service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    /// Base URL of the remote service. Absent disables sync.
    pub base_url: Option<String>,

    /// Static bearer token used when no integration key is set
    pub bearer_token: Option<Secret<String>>,

    /// Shared integration key, sent as `X-Integration-Key`
    pub integration_key: Option<Secret<String>>,

    /// Sync account email for interactive login
    pub email: Option<String>,

    /// Sync account password for interactive login
    pub password: Option<Secret<String>>,

    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// TCP connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Inline or detached dispatch
    #[serde(default)]
    pub dispatch: DispatchMode,

    /// Drop the cached bearer token when the remote answers 401
    #[serde(default)]
    pub reset_token_on_unauthorized: bool,
}

impl SyncConfig {
    /// Base URL with surrounding whitespace and trailing slashes removed.
    /// Blank values count as absent.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url
            .as_deref()
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty())
    }

    /// True when a base URL is configured.
    pub fn is_enabled(&self) -> bool {
        self.base_url().is_some()
    }

    /// Integration key, ignoring blank values.
    pub fn integration_key(&self) -> Option<&Secret<String>> {
        non_blank(self.integration_key.as_ref())
    }

    /// Static bearer token, ignoring blank values.
    pub fn bearer_token(&self) -> Option<&Secret<String>> {
        non_blank(self.bearer_token.as_ref())
    }

    /// Login credentials when both halves are present.
    pub fn credentials(&self) -> Option<(&str, &Secret<String>)> {
        let email = self.email.as_deref().map(str::trim).filter(|e| !e.is_empty())?;
        let password = non_blank(self.password.as_ref())?;
        Some((email, password))
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get connect timeout as Duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Validate sync configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(url) = self.base_url() {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidSyncBaseUrl);
            }
        }

        let has_email = self.email.as_deref().is_some_and(|e| !e.trim().is_empty());
        let has_password = non_blank(self.password.as_ref()).is_some();
        if has_email != has_password {
            return Err(ValidationError::IncompleteSyncCredentials);
        }

        for secs in [self.timeout_secs, self.connect_timeout_secs] {
            if !(1..=120).contains(&secs) {
                return Err(ValidationError::InvalidSyncTimeout);
            }
        }
        Ok(())
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            bearer_token: None,
            integration_key: None,
            email: None,
            password: None,
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            dispatch: DispatchMode::default(),
            reset_token_on_unauthorized: false,
        }
    }
}

fn non_blank(secret: Option<&Secret<String>>) -> Option<&Secret<String>> {
    secret.filter(|s| !s.expose_secret().trim().is_empty())
}

fn default_timeout() -> u64 {
    10
}

fn default_connect_timeout() -> u64 {
    5
}
