//! Ticket-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, TicketId, ValidationError};

/// Ticket-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketError {
    /// Ticket was not found.
    NotFound(TicketId),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl TicketError {
    pub fn not_found(id: TicketId) -> Self {
        TicketError::NotFound(id)
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        TicketError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        TicketError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            TicketError::NotFound(_) => ErrorCode::TicketNotFound,
            TicketError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            TicketError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            TicketError::NotFound(id) => format!("Ticket not found: {}", id),
            TicketError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            TicketError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for TicketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for TicketError {}

impl From<ValidationError> for TicketError {
    fn from(err: ValidationError) -> Self {
        TicketError::validation(err.field().to_string(), err.to_string())
    }
}

impl From<DomainError> for TicketError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => TicketError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => TicketError::Infrastructure(err.to_string()),
        }
    }
}
