//! Sync events: one record per local mutation mirrored to the remote service.
//!
//! Every event is built after the local commit, handed to the publisher
//! once and dropped. Status fields are typed as [`SyncStatus`], so an
//! un-normalized status string cannot end up on the wire.

use serde::Serialize;
use std::fmt;

use super::SyncStatus;
use crate::domain::foundation::{TicketId, Timestamp, UserId};
use crate::domain::ticket::Ticket;

/// Discriminant of a [`SyncEvent`], used for routing and log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncEventKind {
    UserRegistered,
    TicketCreated,
    TicketUpdated,
    TicketDeleted,
    TicketStatusChanged,
    AvatarUpdated,
}

impl SyncEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncEventKind::UserRegistered => "user_registered",
            SyncEventKind::TicketCreated => "ticket_created",
            SyncEventKind::TicketUpdated => "ticket_updated",
            SyncEventKind::TicketDeleted => "ticket_deleted",
            SyncEventKind::TicketStatusChanged => "ticket_status_changed",
            SyncEventKind::AvatarUpdated => "avatar_updated",
        }
    }
}

impl fmt::Display for SyncEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user account was created locally.
///
/// Carries the plain-text password because the remote service provisions
/// its own account from it. `Debug` never prints it.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRegistered {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for UserRegistered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRegistered")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// A ticket was created locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketCreated {
    pub id: TicketId,
    pub title: String,
    pub description: Option<String>,
    pub status: SyncStatus,
    pub priority: String,
    pub assigned_to: Option<UserId>,
    pub due_date: Option<Timestamp>,
}

impl TicketCreated {
    pub fn from_ticket(ticket: &Ticket) -> Self {
        Self {
            id: ticket.id,
            title: ticket.title.clone(),
            description: ticket.description.clone(),
            status: SyncStatus::normalize(&ticket.status),
            priority: ticket.priority.to_lowercase(),
            assigned_to: ticket.assigned_user_id,
            due_date: ticket.due_date,
        }
    }
}

/// A ticket's fields were replaced locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketUpdated {
    pub id: TicketId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<SyncStatus>,
    pub priority: String,
    pub assigned_to: Option<UserId>,
    pub due_date: Option<Timestamp>,
}

impl TicketUpdated {
    pub fn from_ticket(ticket: &Ticket) -> Self {
        Self {
            id: ticket.id,
            title: Some(ticket.title.clone()),
            description: ticket.description.clone(),
            status: Some(SyncStatus::normalize(&ticket.status)),
            priority: ticket.priority.to_lowercase(),
            assigned_to: ticket.assigned_user_id,
            due_date: ticket.due_date,
        }
    }
}

/// A ticket was deleted locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketDeleted {
    pub id: TicketId,
}

/// A ticket moved to another status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketStatusChanged {
    pub id: TicketId,
    pub status: SyncStatus,
}

impl TicketStatusChanged {
    /// Normalizes the internal status string.
    pub fn new(id: TicketId, raw_status: &str) -> Self {
        Self {
            id,
            status: SyncStatus::normalize(raw_status),
        }
    }
}

/// A user uploaded a new avatar image.
#[derive(Clone, PartialEq, Eq)]
pub struct AvatarUpdated {
    pub user_id: UserId,
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl AvatarUpdated {
    /// Synthetic file name sent in the multipart body.
    pub fn file_name(&self) -> String {
        format!("avatar_{}", self.user_id)
    }

    /// Content type for the file part, defaulting when blank.
    pub fn content_type(&self) -> &str {
        let mime = self.mime_type.trim();
        if mime.is_empty() {
            "application/octet-stream"
        } else {
            mime
        }
    }
}

impl fmt::Debug for AvatarUpdated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AvatarUpdated")
            .field("user_id", &self.user_id)
            .field("bytes", &self.bytes.len())
            .field("mime_type", &self.mime_type)
            .finish()
    }
}

/// One fact about a local mutation, to be mirrored to the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    UserRegistered(UserRegistered),
    TicketCreated(TicketCreated),
    TicketUpdated(TicketUpdated),
    TicketDeleted(TicketDeleted),
    TicketStatusChanged(TicketStatusChanged),
    AvatarUpdated(AvatarUpdated),
}

impl SyncEvent {
    pub fn kind(&self) -> SyncEventKind {
        match self {
            SyncEvent::UserRegistered(_) => SyncEventKind::UserRegistered,
            SyncEvent::TicketCreated(_) => SyncEventKind::TicketCreated,
            SyncEvent::TicketUpdated(_) => SyncEventKind::TicketUpdated,
            SyncEvent::TicketDeleted(_) => SyncEventKind::TicketDeleted,
            SyncEvent::TicketStatusChanged(_) => SyncEventKind::TicketStatusChanged,
            SyncEvent::AvatarUpdated(_) => SyncEventKind::AvatarUpdated,
        }
    }

    /// Identity of the record the event is about (ticket or user id).
    pub fn subject(&self) -> String {
        match self {
            SyncEvent::UserRegistered(e) => e.id.to_string(),
            SyncEvent::TicketCreated(e) => e.id.to_string(),
            SyncEvent::TicketUpdated(e) => e.id.to_string(),
            SyncEvent::TicketDeleted(e) => e.id.to_string(),
            SyncEvent::TicketStatusChanged(e) => e.id.to_string(),
            SyncEvent::AvatarUpdated(e) => e.user_id.to_string(),
        }
    }
}

impl From<UserRegistered> for SyncEvent {
    fn from(e: UserRegistered) -> Self {
        SyncEvent::UserRegistered(e)
    }
}

impl From<TicketCreated> for SyncEvent {
    fn from(e: TicketCreated) -> Self {
        SyncEvent::TicketCreated(e)
    }
}

impl From<TicketUpdated> for SyncEvent {
    fn from(e: TicketUpdated) -> Self {
        SyncEvent::TicketUpdated(e)
    }
}

impl From<TicketDeleted> for SyncEvent {
    fn from(e: TicketDeleted) -> Self {
        SyncEvent::TicketDeleted(e)
    }
}

impl From<TicketStatusChanged> for SyncEvent {
    fn from(e: TicketStatusChanged) -> Self {
        SyncEvent::TicketStatusChanged(e)
    }
}

impl From<AvatarUpdated> for SyncEvent {
    fn from(e: AvatarUpdated) -> Self {
        SyncEvent::AvatarUpdated(e)
    }
}
