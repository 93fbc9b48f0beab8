//! User-specific error types.

use crate::domain::foundation::{AuthError, DomainError, ErrorCode, UserId, ValidationError};

/// User-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserError {
    /// User was not found.
    NotFound(UserId),
    /// User has no avatar stored.
    AvatarNotFound(UserId),
    /// Username already registered.
    UsernameTaken,
    /// Email already registered.
    EmailTaken,
    /// Email/password pair did not match.
    InvalidCredentials,
    /// Account exists but sign-in has been disabled by an admin.
    LoginDisabled,
    /// Caller lacks the required role.
    Forbidden,
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl UserError {
    pub fn not_found(id: UserId) -> Self {
        UserError::NotFound(id)
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        UserError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        UserError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            UserError::NotFound(_) | UserError::AvatarNotFound(_) => ErrorCode::UserNotFound,
            UserError::UsernameTaken => ErrorCode::DuplicateUsername,
            UserError::EmailTaken => ErrorCode::DuplicateEmail,
            UserError::InvalidCredentials => ErrorCode::Unauthorized,
            UserError::LoginDisabled | UserError::Forbidden => ErrorCode::Forbidden,
            UserError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            UserError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            UserError::NotFound(id) => format!("User not found: {}", id),
            UserError::AvatarNotFound(id) => format!("No avatar for user {}", id),
            UserError::UsernameTaken => "Username is already taken".to_string(),
            UserError::EmailTaken => "Email is already registered".to_string(),
            UserError::InvalidCredentials => "Invalid email or password".to_string(),
            UserError::LoginDisabled => "Login is disabled for this account".to_string(),
            UserError::Forbidden => "Permission denied".to_string(),
            UserError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            UserError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for UserError {}

impl From<ValidationError> for UserError {
    fn from(err: ValidationError) -> Self {
        UserError::validation(err.field().to_string(), err.to_string())
    }
}

impl From<DomainError> for UserError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::DuplicateUsername => UserError::UsernameTaken,
            ErrorCode::DuplicateEmail => UserError::EmailTaken,
            ErrorCode::ValidationFailed => UserError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => UserError::Infrastructure(err.to_string()),
        }
    }
}

impl From<AuthError> for UserError {
    fn from(err: AuthError) -> Self {
        UserError::Infrastructure(err.to_string())
    }
}
