//! SetLoginAllowedHandler - Admin switch for enabling or disabling sign-in.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, UserId};
use crate::domain::user::{User, UserError};
use crate::ports::UserRepository;

/// Command to allow or block sign-in for an account.
#[derive(Debug, Clone)]
pub struct SetLoginAllowedCommand {
    pub actor: AuthenticatedUser,
    pub user_id: UserId,
    pub is_allowed: bool,
}

/// Handler for the login toggle. Admins only.
pub struct SetLoginAllowedHandler {
    users: Arc<dyn UserRepository>,
}

impl SetLoginAllowedHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: SetLoginAllowedCommand) -> Result<User, UserError> {
        if !cmd.actor.is_admin() {
            tracing::warn!(actor = %cmd.actor.id, target = %cmd.user_id, "Non-admin tried to toggle login");
            return Err(UserError::Forbidden);
        }

        let mut user = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| UserError::not_found(cmd.user_id))?;

        user.set_login_allowed(cmd.is_allowed);
        self.users.update(&user).await?;
        tracing::info!(
            actor = %cmd.actor.id,
            user_id = %user.id,
            is_allowed = cmd.is_allowed,
            "Login permission changed"
        );

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::in_memory::InMemoryUserRepository;
    use crate::domain::foundation::Role;

    fn actor(role: Role) -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new(), "root", "root@example.com", role)
    }

    async fn setup() -> (SetLoginAllowedHandler, Arc<InMemoryUserRepository>, UserId) {
        let users = Arc::new(InMemoryUserRepository::new());
        let bob = User::register("bob", "bob@example.com", "h".into(), Role::User);
        users.save(&bob).await.unwrap();
        (SetLoginAllowedHandler::new(users.clone()), users, bob.id)
    }

    #[tokio::test]
    async fn admin_can_disable_login() {
        let (handler, users, bob) = setup().await;

        let updated = handler
            .handle(SetLoginAllowedCommand {
                actor: actor(Role::Admin),
                user_id: bob,
                is_allowed: false,
            })
            .await
            .unwrap();

        assert!(!updated.is_login_allowed);
        assert!(!users.find_by_id(&bob).await.unwrap().unwrap().is_login_allowed);
    }

    #[tokio::test]
    async fn regular_user_is_forbidden() {
        let (handler, users, bob) = setup().await;

        let err = handler
            .handle(SetLoginAllowedCommand {
                actor: actor(Role::User),
                user_id: bob,
                is_allowed: false,
            })
            .await
            .unwrap_err();

        assert_eq!(err, UserError::Forbidden);
        assert!(users.find_by_id(&bob).await.unwrap().unwrap().is_login_allowed);
    }

    #[tokio::test]
    async fn unknown_target_is_not_found() {
        let (handler, _, _) = setup().await;
        let missing = UserId::new();

        let err = handler
            .handle(SetLoginAllowedCommand {
                actor: actor(Role::Admin),
                user_id: missing,
                is_allowed: true,
            })
            .await
            .unwrap_err();

        assert_eq!(err, UserError::not_found(missing));
    }
}
