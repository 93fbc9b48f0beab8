//! ChangePasswordHandler - Command handler for password rotation.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::user::{validate_new_password, UserError};
use crate::ports::{PasswordHasher, UserRepository};

/// Command to change the caller's password.
#[derive(Clone)]
pub struct ChangePasswordCommand {
    pub user_id: UserId,
    pub current_password: String,
    pub new_password: String,
    pub confirm_new_password: String,
}

impl std::fmt::Debug for ChangePasswordCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangePasswordCommand")
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}

/// Handler for password changes.
pub struct ChangePasswordHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl ChangePasswordHandler {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    pub async fn handle(&self, cmd: ChangePasswordCommand) -> Result<(), UserError> {
        if cmd.new_password != cmd.confirm_new_password {
            return Err(UserError::validation(
                "confirmNewPassword",
                "New password and confirmation do not match",
            ));
        }
        validate_new_password(&cmd.new_password)?;

        let mut user = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| UserError::not_found(cmd.user_id))?;

        if !self.hasher.verify(&cmd.current_password, &user.password_hash)? {
            return Err(UserError::validation(
                "currentPassword",
                "Current password is incorrect",
            ));
        }

        user.set_password_hash(self.hasher.hash(&cmd.new_password)?);
        self.users.update(&user).await?;
        tracing::info!(user_id = %user.id, "Password changed");

        Ok(())
    }
}
