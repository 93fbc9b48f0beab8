//! Avatar handlers - upload mirrors to the remote service, fetch is local.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::user::{Avatar, UserError};
use crate::ports::{SyncPublisher, UserRepository};

/// Command to replace the caller's avatar.
#[derive(Clone)]
pub struct UploadAvatarCommand {
    pub user_id: UserId,
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl std::fmt::Debug for UploadAvatarCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadAvatarCommand")
            .field("user_id", &self.user_id)
            .field("bytes", &self.bytes.len())
            .field("mime_type", &self.mime_type)
            .finish()
    }
}

/// Handler for avatar uploads.
pub struct UploadAvatarHandler {
    users: Arc<dyn UserRepository>,
    publisher: Arc<dyn SyncPublisher>,
}

impl UploadAvatarHandler {
    pub fn new(users: Arc<dyn UserRepository>, publisher: Arc<dyn SyncPublisher>) -> Self {
        Self { users, publisher }
    }

    pub async fn handle(&self, cmd: UploadAvatarCommand) -> Result<(), UserError> {
        let mut user = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| UserError::not_found(cmd.user_id))?;

        user.set_avatar(cmd.bytes, &cmd.mime_type)?;
        self.users.update(&user).await?;

        let Some(avatar) = user.avatar else {
            return Ok(());
        };
        tracing::info!(user_id = %user.id, bytes = avatar.data.len(), "Avatar updated");

        self.publisher
            .publish_avatar_updated(user.id, avatar.data, avatar.mime_type)
            .await;

        Ok(())
    }
}

/// Handler returning a user's stored avatar.
pub struct GetAvatarHandler {
    users: Arc<dyn UserRepository>,
}

impl GetAvatarHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, user_id: UserId) -> Result<Avatar, UserError> {
        self.users
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| UserError::not_found(user_id))?
            .avatar
            .ok_or(UserError::AvatarNotFound(user_id))
    }
}
