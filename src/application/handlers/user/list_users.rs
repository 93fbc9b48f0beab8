//! User list queries.

use std::sync::Arc;

use crate::domain::user::UserError;
use crate::ports::{AssigneeSummary, UserPage, UserPageQuery, UserRepository};

/// Handler for the paged, searchable user directory.
pub struct ListUsersHandler {
    users: Arc<dyn UserRepository>,
}

impl ListUsersHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, query: UserPageQuery) -> Result<UserPage, UserError> {
        Ok(self.users.search(&query).await?)
    }
}

/// Handler for the assignee picker: every user as `{id, username}`.
pub struct ListTicketUsersHandler {
    users: Arc<dyn UserRepository>,
}

impl ListTicketUsersHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self) -> Result<Vec<AssigneeSummary>, UserError> {
        let users = self.users.list_all().await?;
        Ok(users
            .into_iter()
            .map(|u| AssigneeSummary {
                id: u.id,
                username: u.username,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::in_memory::InMemoryUserRepository;
    use crate::domain::foundation::Role;
    use crate::domain::user::User;

    async fn repo() -> Arc<InMemoryUserRepository> {
        let users = Arc::new(InMemoryUserRepository::new());
        for name in ["zoe", "adam", "mia"] {
            users
                .save(&User::register(
                    name,
                    &format!("{}@example.com", name),
                    "h".into(),
                    Role::User,
                ))
                .await
                .unwrap();
        }
        users
    }

    #[tokio::test]
    async fn ticket_users_are_sorted_by_username() {
        let summaries = ListTicketUsersHandler::new(repo().await)
            .handle()
            .await
            .unwrap();
        let names: Vec<_> = summaries.iter().map(|s| s.username.as_str()).collect();
        assert_eq!(names, vec!["adam", "mia", "zoe"]);
    }

    #[tokio::test]
    async fn list_users_pages_search_results() {
        let page = ListUsersHandler::new(repo().await)
            .handle(UserPageQuery::new(1, 2, None))
            .await
            .unwrap();
        assert_eq!(page.total_records, 3);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].username, "adam");
    }
}
