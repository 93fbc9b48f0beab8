//! Result taxonomy for a single publish attempt.

use thiserror::Error;

/// What happened when an event was handed to the publisher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The remote service accepted the call.
    Delivered { status: u16 },
    /// No base URL configured; nothing was sent.
    Disabled,
}

/// Why a publish attempt did not reach or satisfy the remote service.
///
/// These never cross the publisher boundary; they exist so the failure
/// can be logged and asserted on in tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncFailure {
    /// No integration key and no way to obtain a bearer token.
    #[error("no usable credential: {0}")]
    AuthUnresolvable(String),

    /// Network, DNS or timeout failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The remote answered with a non-success status.
    #[error("remote rejected request with {status}: {reason}")]
    RemoteRejected { status: u16, reason: String },

    /// A response arrived but lacked the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The request body could not be built.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl SyncFailure {
    pub fn auth_unresolvable(reason: impl Into<String>) -> Self {
        Self::AuthUnresolvable(reason.into())
    }

    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport(reason.into())
    }

    pub fn rejected(status: u16, reason: impl Into<String>) -> Self {
        Self::RemoteRejected {
            status,
            reason: reason.into(),
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse(reason.into())
    }

    /// Short label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            SyncFailure::AuthUnresolvable(_) => "auth_unresolvable",
            SyncFailure::Transport(_) => "transport",
            SyncFailure::RemoteRejected { .. } => "remote_rejected",
            SyncFailure::MalformedResponse(_) => "malformed_response",
            SyncFailure::Serialization(_) => "serialization",
        }
    }

    /// HTTP status, when the remote answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            SyncFailure::RemoteRejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

impl From<serde_json::Error> for SyncFailure {
    fn from(err: serde_json::Error) -> Self {
        SyncFailure::Serialization(err.to_string())
    }
}
