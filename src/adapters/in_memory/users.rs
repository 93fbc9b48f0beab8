//! In-memory implementation of UserRepository.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::User;
use crate::ports::{UserPage, UserPageQuery, UserRepository};

/// Users held in process memory, used by tests and `memory://` runs.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Username for an id, used by the ticket repository's listing join.
    pub async fn username_of(&self, id: &UserId) -> Option<String> {
        self.users.read().await.get(id).map(|u| u.username.clone())
    }
}

fn check_unique(users: &HashMap<UserId, User>, candidate: &User) -> Result<(), DomainError> {
    for other in users.values().filter(|u| u.id != candidate.id) {
        if other.username.eq_ignore_ascii_case(&candidate.username) {
            return Err(DomainError::new(
                ErrorCode::DuplicateUsername,
                format!("Username already taken: {}", candidate.username),
            ));
        }
        if other.email.eq_ignore_ascii_case(&candidate.email) {
            return Err(DomainError::new(
                ErrorCode::DuplicateEmail,
                format!("Email already registered: {}", candidate.email),
            ));
        }
    }
    Ok(())
}

fn matches(user: &User, term: &str) -> bool {
    let contains = |field: &str| field.to_lowercase().contains(term);
    contains(&user.username)
        || contains(&user.email)
        || user.phone_number.as_deref().is_some_and(contains)
        || user.address.as_deref().is_some_and(contains)
}

fn sorted(mut users: Vec<User>) -> Vec<User> {
    users.sort_by(|a, b| a.username.cmp(&b.username).then(a.id.cmp(&b.id)));
    users
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        check_unique(&users, user)?;
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(DomainError::new(
                ErrorCode::UserNotFound,
                format!("User not found: {}", user.id),
            ));
        }
        check_unique(&users, user)?;
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let email = email.trim();
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let username = username.trim();
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.username.eq_ignore_ascii_case(username))
            .cloned())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.users.read().await.len() as u64)
    }

    async fn search(&self, query: &UserPageQuery) -> Result<UserPage, DomainError> {
        let users = self.users.read().await;
        let filtered: Vec<User> = users
            .values()
            .filter(|u| query.search.as_deref().map_or(true, |t| matches(u, t)))
            .cloned()
            .collect();

        let total_records = filtered.len() as u64;
        let items = sorted(filtered)
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.page_size as usize)
            .collect();

        Ok(UserPage {
            items,
            total_records,
        })
    }

    async fn list_all(&self) -> Result<Vec<User>, DomainError> {
        Ok(sorted(self.users.read().await.values().cloned().collect()))
    }
}
