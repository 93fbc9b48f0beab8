//! RegisterUserHandler - Command handler for account sign-up.

use std::sync::Arc;

use crate::domain::foundation::Role;
use crate::domain::sync::UserRegistered;
use crate::domain::user::{validate_email, validate_password, validate_username, User, UserError};
use crate::ports::{PasswordHasher, SyncPublisher, UserRepository};

/// Command to register a new account.
#[derive(Clone)]
pub struct RegisterUserCommand {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for RegisterUserCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterUserCommand")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Handler for registering users.
///
/// The first account ever registered becomes `Admin`.
pub struct RegisterUserHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    publisher: Arc<dyn SyncPublisher>,
}

impl RegisterUserHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        publisher: Arc<dyn SyncPublisher>,
    ) -> Self {
        Self {
            users,
            hasher,
            publisher,
        }
    }

    pub async fn handle(&self, cmd: RegisterUserCommand) -> Result<User, UserError> {
        // 1. Validate
        validate_username(&cmd.username)?;
        validate_email(&cmd.email)?;
        validate_password(&cmd.password)?;

        // 2. Uniqueness (the store enforces it too)
        if self.users.find_by_username(&cmd.username).await?.is_some() {
            return Err(UserError::UsernameTaken);
        }
        if self.users.find_by_email(&cmd.email).await?.is_some() {
            return Err(UserError::EmailTaken);
        }

        // 3. Build and persist
        let role = if self.users.count().await? == 0 {
            Role::Admin
        } else {
            Role::User
        };
        let hash = self.hasher.hash(&cmd.password)?;
        let user = User::register(&cmd.username, &cmd.email, hash, role);
        self.users.save(&user).await?;
        tracing::info!(user_id = %user.id, role = %user.role, "User registered");

        // 4. Mirror
        self.publisher
            .publish_user_registered(UserRegistered {
                id: user.id,
                username: user.username.clone(),
                email: user.email.clone(),
                password: cmd.password,
            })
            .await;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::in_memory::InMemoryUserRepository;
    use crate::adapters::sync::RecordingSyncPublisher;
    use crate::domain::foundation::DomainError;
    use crate::domain::sync::SyncEvent;

    struct PlainHasher;

    impl PasswordHasher for PlainHasher {
        fn hash(&self, password: &str) -> Result<String, DomainError> {
            Ok(format!("plain:{}", password))
        }
        fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
            Ok(hash == format!("plain:{}", password))
        }
    }

    fn setup() -> (
        RegisterUserHandler,
        Arc<InMemoryUserRepository>,
        Arc<RecordingSyncPublisher>,
    ) {
        let users = Arc::new(InMemoryUserRepository::new());
        let publisher = Arc::new(RecordingSyncPublisher::new());
        let handler =
            RegisterUserHandler::new(users.clone(), Arc::new(PlainHasher), publisher.clone());
        (handler, users, publisher)
    }

    fn command(username: &str) -> RegisterUserCommand {
        RegisterUserCommand {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password: "password123".to_string(),
        }
    }

    #[tokio::test]
    async fn first_user_is_admin_then_users() {
        let (handler, _, _) = setup();

        let first = handler.handle(command("alice")).await.unwrap();
        let second = handler.handle(command("bob")).await.unwrap();

        assert_eq!(first.role, Role::Admin);
        assert_eq!(second.role, Role::User);
    }

    #[tokio::test]
    async fn stores_hash_and_publishes_raw_password() {
        let (handler, users, publisher) = setup();

        let user = handler.handle(command("alice")).await.unwrap();

        let stored = users.find_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(stored.password_hash, "plain:password123");
        match &publisher.published_events()[0] {
            SyncEvent::UserRegistered(e) => {
                assert_eq!(e.id, user.id);
                assert_eq!(e.password, "password123");
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[tokio::test]
    async fn duplicate_username_or_email_is_rejected() {
        let (handler, _, publisher) = setup();
        handler.handle(command("alice")).await.unwrap();

        let err = handler.handle(command("ALICE")).await.unwrap_err();
        assert_eq!(err, UserError::UsernameTaken);

        let err = handler
            .handle(RegisterUserCommand {
                email: "Alice@Example.com".into(),
                ..command("alicia")
            })
            .await
            .unwrap_err();
        assert_eq!(err, UserError::EmailTaken);

        assert_eq!(publisher.event_count(), 1);
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let (handler, _, publisher) = setup();

        let err = handler
            .handle(RegisterUserCommand {
                password: "short".into(),
                ..command("alice")
            })
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::ValidationFailed { ref field, .. } if field == "password"));
        assert_eq!(publisher.event_count(), 0);
    }

    #[test]
    fn debug_omits_password() {
        let rendered = format!("{:?}", command("alice"));
        assert!(!rendered.contains("password123"));
    }
}
