//! HTTP adapter for the `SyncPublisher` port.
//!
//! Each event becomes exactly one request against the remote ticket
//! service. [`HttpSyncPublisher::deliver`] returns the typed outcome;
//! the port method wraps it and turns every failure into a log line.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder};
use serde_json::json;

use super::auth_resolver::{SyncAuthResolver, SyncCredential};
use crate::config::SyncConfig;
use crate::domain::sync::{
    AuthMode, AvatarUpdated, SyncEvent, SyncEventKind, SyncFailure, SyncMethod, SyncOutcome,
    SyncRoute,
};
use crate::ports::SyncPublisher;

struct Remote {
    base_url: String,
    auth: SyncAuthResolver,
}

/// Publishes sync events over HTTP.
pub struct HttpSyncPublisher {
    client: reqwest::Client,
    remote: Option<Remote>,
    reset_token_on_unauthorized: bool,
}

impl HttpSyncPublisher {
    /// Builds the publisher and its HTTP client with explicit timeouts.
    ///
    /// Without a base URL the publisher is inert: every event resolves to
    /// [`SyncOutcome::Disabled`] and no request is ever made.
    pub fn new(config: &SyncConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()?;

        let remote = config.base_url().map(|base_url| Remote {
            base_url: base_url.to_string(),
            auth: SyncAuthResolver::new(client.clone(), base_url, config),
        });

        Ok(Self {
            client,
            remote,
            reset_token_on_unauthorized: config.reset_token_on_unauthorized,
        })
    }

    /// Strategy the publisher would use, or `None` when disabled.
    pub fn auth_mode(&self) -> Option<AuthMode> {
        self.remote.as_ref().map(|r| r.auth.mode())
    }

    /// Performs the remote call for one event and reports what happened.
    pub async fn deliver(&self, event: &SyncEvent) -> Result<SyncOutcome, SyncFailure> {
        self.attempt(event).await.outcome
    }

    async fn attempt(&self, event: &SyncEvent) -> Attempt {
        let Some(remote) = &self.remote else {
            return Attempt {
                route: None,
                outcome: Ok(SyncOutcome::Disabled),
            };
        };

        match plan(remote, event).await {
            Ok((route, credential)) => {
                let outcome = self.send(remote, event, &route, credential).await;
                Attempt {
                    route: Some(route),
                    outcome,
                }
            }
            Err(failure) => Attempt {
                route: None,
                outcome: Err(failure),
            },
        }
    }

    async fn send(
        &self,
        remote: &Remote,
        event: &SyncEvent,
        route: &SyncRoute,
        credential: Option<SyncCredential>,
    ) -> Result<SyncOutcome, SyncFailure> {
        let url = format!("{}{}", remote.base_url, route.path);
        let mut request = attach_body(self.client.request(to_method(route.method), url), event)?;
        if let Some(credential) = &credential {
            request = credential.apply(request);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                SyncFailure::transport(format!("request timed out: {}", e))
            } else if e.is_connect() {
                SyncFailure::transport(format!("connection failed: {}", e))
            } else {
                SyncFailure::transport(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(SyncOutcome::Delivered {
                status: status.as_u16(),
            });
        }

        let failure = SyncFailure::rejected(
            status.as_u16(),
            status.canonical_reason().unwrap_or("unexpected status"),
        );
        if failure.is_unauthorized()
            && self.reset_token_on_unauthorized
            && matches!(credential, Some(SyncCredential::Bearer(_)))
        {
            remote.auth.invalidate().await;
        }
        Err(failure)
    }
}

/// One publish attempt: the route actually requested, if any, and its result.
struct Attempt {
    route: Option<SyncRoute>,
    outcome: Result<SyncOutcome, SyncFailure>,
}

impl Attempt {
    fn target(&self) -> String {
        self.route
            .as_ref()
            .map(|route| route.to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}

/// Picks the credential and the endpoint it unlocks.
async fn plan(
    remote: &Remote,
    event: &SyncEvent,
) -> Result<(SyncRoute, Option<SyncCredential>), SyncFailure> {
    let kind = event.kind();
    let subject = event.subject();

    let credential = match kind {
        SyncEventKind::UserRegistered => remote.auth.existing_bearer().await,
        _ => {
            if SyncRoute::resolve(kind, remote.auth.mode(), &subject).is_none() {
                return Err(SyncFailure::auth_unresolvable(format!(
                    "{} requires an integration key",
                    kind
                )));
            }
            Some(remote.auth.resolve().await?)
        }
    };

    let mode = credential
        .as_ref()
        .map(SyncCredential::mode)
        .unwrap_or(AuthMode::Bearer);
    let route = SyncRoute::resolve(kind, mode, &subject).ok_or_else(|| {
        SyncFailure::auth_unresolvable(format!("no endpoint for {} in {} mode", kind, mode))
    })?;
    Ok((route, credential))
}

fn to_method(method: SyncMethod) -> Method {
    match method {
        SyncMethod::Post => Method::POST,
        SyncMethod::Put => Method::PUT,
        SyncMethod::Patch => Method::PATCH,
        SyncMethod::Delete => Method::DELETE,
    }
}

fn attach_body(request: RequestBuilder, event: &SyncEvent) -> Result<RequestBuilder, SyncFailure> {
    let request = match event {
        SyncEvent::UserRegistered(e) => request.json(&serde_json::to_value(e)?),
        SyncEvent::TicketCreated(e) => request.json(&serde_json::to_value(e)?),
        SyncEvent::TicketUpdated(e) => request.json(&serde_json::to_value(e)?),
        SyncEvent::TicketStatusChanged(e) => request.json(&json!({ "status": e.status })),
        SyncEvent::TicketDeleted(_) => request,
        SyncEvent::AvatarUpdated(e) => request.multipart(avatar_form(e)?),
    };
    Ok(request)
}

fn avatar_form(event: &AvatarUpdated) -> Result<Form, SyncFailure> {
    let part = Part::bytes(event.bytes.clone())
        .file_name(event.file_name())
        .mime_str(event.content_type())
        .map_err(|e| SyncFailure::Serialization(format!("invalid avatar mime type: {}", e)))?;
    Ok(Form::new().part("file", part))
}

#[async_trait]
impl SyncPublisher for HttpSyncPublisher {
    async fn publish(&self, event: SyncEvent) {
        let kind = event.kind();
        let subject = event.subject();
        let attempt = self.attempt(&event).await;

        match &attempt.outcome {
            Ok(SyncOutcome::Delivered { status }) => {
                tracing::info!(
                    event_kind = %kind,
                    subject = %subject,
                    target = %attempt.target(),
                    status = *status,
                    "Sync delivered"
                );
            }
            Ok(SyncOutcome::Disabled) => {
                tracing::debug!(event_kind = %kind, subject = %subject, "Sync disabled, skipping");
            }
            Err(failure) => {
                tracing::warn!(
                    event_kind = %kind,
                    subject = %subject,
                    target = %attempt.target(),
                    failure = failure.kind(),
                    status = ?failure.status(),
                    error = %failure,
                    "Sync failed"
                );
            }
        }
    }
}

impl std::fmt::Debug for HttpSyncPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSyncPublisher")
            .field("base_url", &self.remote.as_ref().map(|r| r.base_url.as_str()))
            .field("auth_mode", &self.auth_mode())
            .finish_non_exhaustive()
    }
}
