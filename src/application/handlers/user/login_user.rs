//! LoginUserHandler - Exchanges credentials for an access token.

use std::sync::Arc;

use crate::domain::user::{User, UserError};
use crate::ports::{IssuedToken, PasswordHasher, TokenService, UserRepository};

/// Command to sign in.
#[derive(Clone)]
pub struct LoginUserCommand {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginUserCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginUserCommand")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Result of a successful sign-in.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub token: IssuedToken,
    pub user: User,
}

/// Handler for signing in.
pub struct LoginUserHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
}

impl LoginUserHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    pub async fn handle(&self, cmd: LoginUserCommand) -> Result<LoginResult, UserError> {
        let user = self
            .users
            .find_by_email(&cmd.email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !self.hasher.verify(&cmd.password, &user.password_hash)? {
            tracing::debug!(user_id = %user.id, "Login rejected: wrong password");
            return Err(UserError::InvalidCredentials);
        }

        // Only reported once the password matched.
        if !user.is_login_allowed {
            return Err(UserError::LoginDisabled);
        }

        let token = self.tokens.issue(&user)?;
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginResult { token, user })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::JwtTokenService;
    use crate::adapters::in_memory::InMemoryUserRepository;
    use crate::config::AuthConfig;
    use crate::domain::foundation::{DomainError, Role};
    use secrecy::Secret;

    struct PlainHasher;

    impl PasswordHasher for PlainHasher {
        fn hash(&self, password: &str) -> Result<String, DomainError> {
            Ok(format!("plain:{}", password))
        }
        fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
            Ok(hash == format!("plain:{}", password))
        }
    }

    async fn setup(login_allowed: bool) -> (LoginUserHandler, Arc<JwtTokenService>, User) {
        let users = Arc::new(InMemoryUserRepository::new());
        let mut alice = User::register(
            "alice",
            "alice@example.com",
            "plain:password123".into(),
            Role::User,
        );
        alice.set_login_allowed(login_allowed);
        users.save(&alice).await.unwrap();

        let tokens = Arc::new(JwtTokenService::new(&AuthConfig {
            jwt_secret: Secret::new("test-secret".into()),
            ..Default::default()
        }));
        (
            LoginUserHandler::new(users, Arc::new(PlainHasher), tokens.clone()),
            tokens,
            alice,
        )
    }

    fn command(email: &str, password: &str) -> LoginUserCommand {
        LoginUserCommand {
            email: email.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn valid_credentials_issue_token() {
        let (handler, tokens, alice) = setup(true).await;

        let result = handler
            .handle(command("ALICE@example.com", "password123"))
            .await
            .unwrap();

        assert_eq!(result.user.id, alice.id);
        assert_eq!(tokens.validate(&result.token.token).unwrap().id, alice.id);
    }

    #[tokio::test]
    async fn wrong_password_or_unknown_email_is_invalid_credentials() {
        let (handler, _, _) = setup(true).await;

        let err = handler
            .handle(command("alice@example.com", "nope"))
            .await
            .unwrap_err();
        assert_eq!(err, UserError::InvalidCredentials);

        let err = handler
            .handle(command("nobody@example.com", "password123"))
            .await
            .unwrap_err();
        assert_eq!(err, UserError::InvalidCredentials);
    }

    #[tokio::test]
    async fn disabled_account_cannot_log_in() {
        let (handler, _, _) = setup(false).await;

        let err = handler
            .handle(command("alice@example.com", "password123"))
            .await
            .unwrap_err();
        assert_eq!(err, UserError::LoginDisabled);
    }
}
