//! Profile handlers - read and edit the caller's own account.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::user::{ProfileChanges, User, UserError};
use crate::ports::UserRepository;

/// Handler returning the caller's account.
pub struct GetCurrentUserHandler {
    users: Arc<dyn UserRepository>,
}

impl GetCurrentUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, user_id: UserId) -> Result<User, UserError> {
        self.users
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| UserError::not_found(user_id))
    }
}

/// Command to edit profile fields. `None` leaves a field as is; a blank
/// phone number or address clears it.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileCommand {
    pub user_id: UserId,
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

/// Handler for profile edits.
pub struct UpdateProfileHandler {
    users: Arc<dyn UserRepository>,
}

impl UpdateProfileHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: UpdateProfileCommand) -> Result<User, UserError> {
        let mut user = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| UserError::not_found(cmd.user_id))?;

        user.update_profile(ProfileChanges {
            username: cmd.username,
            email: cmd.email,
            phone_number: cmd.phone_number,
            address: cmd.address,
        })?;
        self.users.update(&user).await?;
        tracing::info!(user_id = %user.id, "Profile updated");

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::in_memory::InMemoryUserRepository;
    use crate::domain::foundation::Role;

    async fn setup() -> (Arc<InMemoryUserRepository>, User, User) {
        let users = Arc::new(InMemoryUserRepository::new());
        let alice = User::register("alice", "alice@example.com", "h".into(), Role::User);
        let bob = User::register("bob", "bob@example.com", "h".into(), Role::User);
        users.save(&alice).await.unwrap();
        users.save(&bob).await.unwrap();
        (users, alice, bob)
    }

    #[tokio::test]
    async fn get_current_user_requires_existing_account() {
        let (users, alice, _) = setup().await;
        let handler = GetCurrentUserHandler::new(users);

        assert_eq!(handler.handle(alice.id).await.unwrap().username, "alice");

        let missing = UserId::new();
        assert_eq!(
            handler.handle(missing).await.unwrap_err(),
            UserError::not_found(missing)
        );
    }

    #[tokio::test]
    async fn update_profile_sets_and_clears_contact_fields() {
        let (users, alice, _) = setup().await;
        let handler = UpdateProfileHandler::new(users.clone());

        let updated = handler
            .handle(UpdateProfileCommand {
                user_id: alice.id,
                phone_number: Some("555-0100".into()),
                address: Some("1 Main St".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(updated.phone_number.as_deref(), Some("555-0100"));

        let cleared = handler
            .handle(UpdateProfileCommand {
                user_id: alice.id,
                phone_number: Some("  ".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(cleared.phone_number.is_none());
        assert_eq!(cleared.address.as_deref(), Some("1 Main St"));
    }

    #[tokio::test]
    async fn taking_another_users_name_conflicts() {
        let (users, alice, _) = setup().await;
        let handler = UpdateProfileHandler::new(users);

        let err = handler
            .handle(UpdateProfileCommand {
                user_id: alice.id,
                username: Some("Bob".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err, UserError::UsernameTaken);
    }
}
