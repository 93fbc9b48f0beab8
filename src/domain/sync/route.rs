//! Endpoint table keyed by (event kind, auth mode).

use std::fmt;

use super::SyncEventKind;

const SYNC_TICKET_BASE: &str = "/api/sync/ticket";
const TICKET_BASE: &str = "/api/ticket";
const REGISTER_PATH: &str = "/api/auth/register";

/// Which credential a publish attempt is made with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthMode {
    /// Static shared key in the `X-Integration-Key` header.
    IntegrationKey,
    /// Bearer token, static or obtained via login.
    Bearer,
}

impl AuthMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMode::IntegrationKey => "integration_key",
            AuthMode::Bearer => "bearer",
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP verb used for a sync call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncMethod {
    Post,
    Put,
    Patch,
    Delete,
}

impl fmt::Display for SyncMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SyncMethod::Post => "POST",
            SyncMethod::Put => "PUT",
            SyncMethod::Patch => "PATCH",
            SyncMethod::Delete => "DELETE",
        };
        f.write_str(s)
    }
}

/// Method and path (relative to the base URL) for one sync call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRoute {
    pub method: SyncMethod,
    pub path: String,
}

impl SyncRoute {
    fn new(method: SyncMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }

    /// Looks up the route for an event.
    ///
    /// `subject` is the ticket id for ticket events and the user id for
    /// avatar events. Returns `None` when the pair has no endpoint, which
    /// today only happens for avatars without an integration key.
    pub fn resolve(kind: SyncEventKind, mode: AuthMode, subject: &str) -> Option<Self> {
        let ticket_base = match mode {
            AuthMode::IntegrationKey => SYNC_TICKET_BASE,
            AuthMode::Bearer => TICKET_BASE,
        };

        let route = match kind {
            SyncEventKind::UserRegistered => Self::new(SyncMethod::Post, REGISTER_PATH),
            SyncEventKind::TicketCreated => Self::new(SyncMethod::Post, ticket_base),
            SyncEventKind::TicketUpdated => {
                Self::new(SyncMethod::Put, format!("{}/{}", ticket_base, subject))
            }
            SyncEventKind::TicketDeleted => {
                Self::new(SyncMethod::Delete, format!("{}/{}", ticket_base, subject))
            }
            SyncEventKind::TicketStatusChanged => {
                Self::new(SyncMethod::Patch, format!("{}/{}/move", ticket_base, subject))
            }
            SyncEventKind::AvatarUpdated => match mode {
                AuthMode::IntegrationKey => Self::new(
                    SyncMethod::Post,
                    format!("/api/sync/users/{}/avatar", subject),
                ),
                AuthMode::Bearer => return None,
            },
        };
        Some(route)
    }
}

impl fmt::Display for SyncRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}
