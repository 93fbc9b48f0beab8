//! User aggregate and the field rules for accounts.

use crate::domain::foundation::{Role, Timestamp, UserId, ValidationError};

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 50;
const EMAIL_MAX: usize = 100;
const PASSWORD_MIN: usize = 8;
const PASSWORD_MAX: usize = 100;
const CONTACT_MAX: usize = 100;
const PASSWORD_SPECIALS: &[char] = &['@', '$', '!', '%', '*', '?', '&'];

/// Largest accepted avatar upload.
pub const MAX_AVATAR_BYTES: usize = 10 * 1024 * 1024;

/// Stored avatar image.
#[derive(Clone, PartialEq, Eq)]
pub struct Avatar {
    pub data: Vec<u8>,
    pub mime_type: String,
    pub updated_at: Timestamp,
}

impl std::fmt::Debug for Avatar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Avatar")
            .field("bytes", &self.data.len())
            .field("mime_type", &self.mime_type)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub role: Role,
    pub avatar: Option<Avatar>,
    pub is_login_allowed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Optional profile edits. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

impl User {
    /// Builds a new account from already-validated fields and a password hash.
    pub fn register(username: &str, email: &str, password_hash: String, role: Role) -> Self {
        let now = Timestamp::now();
        Self {
            id: UserId::new(),
            username: username.trim().to_string(),
            email: email.trim().to_string(),
            password_hash,
            phone_number: None,
            address: None,
            role,
            avatar: None,
            is_login_allowed: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies profile edits after validating every supplied field.
    pub fn update_profile(&mut self, changes: ProfileChanges) -> Result<(), ValidationError> {
        if let Some(username) = &changes.username {
            validate_username(username)?;
        }
        if let Some(email) = &changes.email {
            validate_email(email)?;
        }
        if let Some(phone) = &changes.phone_number {
            ValidationError::check_length("phoneNumber", phone, 0, CONTACT_MAX)?;
        }
        if let Some(address) = &changes.address {
            ValidationError::check_length("address", address, 0, CONTACT_MAX)?;
        }

        if let Some(username) = changes.username {
            self.username = username.trim().to_string();
        }
        if let Some(email) = changes.email {
            self.email = email.trim().to_string();
        }
        if let Some(phone) = changes.phone_number {
            self.phone_number = non_empty(phone);
        }
        if let Some(address) = changes.address {
            self.address = non_empty(address);
        }
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Replaces the stored avatar.
    pub fn set_avatar(&mut self, data: Vec<u8>, mime_type: &str) -> Result<(), ValidationError> {
        validate_avatar(&data)?;
        let now = Timestamp::now();
        let mime = mime_type.trim();
        self.avatar = Some(Avatar {
            data,
            mime_type: if mime.is_empty() {
                "application/octet-stream".to_string()
            } else {
                mime.to_string()
            },
            updated_at: now,
        });
        self.updated_at = now;
        Ok(())
    }

    pub fn set_password_hash(&mut self, hash: String) {
        self.password_hash = hash;
        self.updated_at = Timestamp::now();
    }

    pub fn set_login_allowed(&mut self, allowed: bool) {
        self.is_login_allowed = allowed;
        self.updated_at = Timestamp::now();
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    ValidationError::check_length("username", username, USERNAME_MIN, USERNAME_MAX)
}

/// Shape check only: one `@`, non-empty local part, dotted domain.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    ValidationError::check_length("email", email, 1, EMAIL_MAX)?;
    let email = email.trim();
    let invalid = || ValidationError::invalid_format("email", "not a valid email address");

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty()
        || domain.contains('@')
        || email.contains(char::is_whitespace)
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
    {
        return Err(invalid());
    }
    Ok(())
}

/// Length rule applied at registration and login.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let len = password.chars().count();
    if len == 0 {
        return Err(ValidationError::empty_field("password"));
    }
    if !(PASSWORD_MIN..=PASSWORD_MAX).contains(&len) {
        return Err(ValidationError::invalid_length(
            "password",
            PASSWORD_MIN,
            PASSWORD_MAX,
            len,
        ));
    }
    Ok(())
}

/// Stricter rule for password changes: length plus character classes.
pub fn validate_new_password(password: &str) -> Result<(), ValidationError> {
    validate_password(password).map_err(|e| match e {
        ValidationError::EmptyField { .. } => ValidationError::empty_field("newPassword"),
        ValidationError::InvalidLength { min, max, actual, .. } => {
            ValidationError::invalid_length("newPassword", min, max, actual)
        }
        other => other,
    })?;

    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| PASSWORD_SPECIALS.contains(&c));
    if !(has_lower && has_upper && has_digit && has_special) {
        return Err(ValidationError::invalid_format(
            "newPassword",
            "must contain a lowercase letter, an uppercase letter, a digit and one of @$!%*?&",
        ));
    }
    Ok(())
}

pub fn validate_avatar(data: &[u8]) -> Result<(), ValidationError> {
    if data.is_empty() {
        return Err(ValidationError::empty_field("file"));
    }
    if data.len() > MAX_AVATAR_BYTES {
        return Err(ValidationError::invalid_format(
            "file",
            "avatar must not exceed 10 MiB",
        ));
    }
    Ok(())
}
