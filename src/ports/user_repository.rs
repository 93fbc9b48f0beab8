//! User repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::User;

const DEFAULT_PAGE_SIZE: u32 = 10;
const MAX_PAGE_SIZE: u32 = 100;

/// Paging and filtering for the user list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPageQuery {
    pub page_number: u32,
    pub page_size: u32,
    pub search: Option<String>,
}

impl UserPageQuery {
    /// Clamps raw request values: page numbers start at 1 and sizes
    /// outside `1..=100` fall back to 10. Blank search terms are dropped.
    pub fn new(page_number: i64, page_size: i64, search: Option<String>) -> Self {
        let page_number = if page_number < 1 {
            1
        } else {
            u32::try_from(page_number).unwrap_or(u32::MAX)
        };
        let page_size = if (1..=i64::from(MAX_PAGE_SIZE)).contains(&page_size) {
            page_size as u32
        } else {
            DEFAULT_PAGE_SIZE
        };
        let search = search
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());
        Self {
            page_number,
            page_size,
            search,
        }
    }

    /// Rows to skip before this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page_number - 1) * u64::from(self.page_size)
    }
}

impl Default for UserPageQuery {
    fn default() -> Self {
        Self::new(1, i64::from(DEFAULT_PAGE_SIZE), None)
    }
}

/// One page of users plus the unpaged match count.
#[derive(Debug, Clone)]
pub struct UserPage {
    pub items: Vec<User>,
    pub total_records: u64,
}

/// Repository port for User persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Save a new user.
    ///
    /// # Errors
    ///
    /// - `DuplicateUsername` / `DuplicateEmail` on unique violations
    async fn save(&self, user: &User) -> Result<(), DomainError>;

    /// Update an existing user, avatar included.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user doesn't exist
    /// - `DuplicateUsername` / `DuplicateEmail` on unique violations
    async fn update(&self, user: &User) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Case-insensitive lookup.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Case-insensitive lookup.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Number of registered users.
    async fn count(&self) -> Result<u64, DomainError>;

    /// Page of users ordered by username then id, filtered by a
    /// case-insensitive substring match on username, email, phone and address.
    async fn search(&self, query: &UserPageQuery) -> Result<UserPage, DomainError>;

    /// All users ordered by username.
    async fn list_all(&self) -> Result<Vec<User>, DomainError>;
}
