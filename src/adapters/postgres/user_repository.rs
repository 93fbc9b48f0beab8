//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, Role, Timestamp, UserId};
use crate::domain::user::{Avatar, User};
use crate::ports::{UserPage, UserPageQuery, UserRepository};

const USERNAME_KEY: &str = "users_username_lower_key";
const EMAIL_KEY: &str = "users_email_lower_key";

/// PostgreSQL implementation of the UserRepository port.
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
///
/// List queries select NULL for the avatar columns so pages never carry
/// image bytes.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    phone_number: Option<String>,
    address: Option<String>,
    role: String,
    avatar_data: Option<Vec<u8>>,
    avatar_mime_type: Option<String>,
    avatar_updated_at: Option<DateTime<Utc>>,
    is_login_allowed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role: Role = row.role.parse().map_err(|_| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid role value: {}", row.role),
            )
        })?;

        let avatar = match (row.avatar_data, row.avatar_updated_at) {
            (Some(data), Some(updated_at)) => Some(Avatar {
                data,
                mime_type: row
                    .avatar_mime_type
                    .unwrap_or_else(|| "application/octet-stream".to_string()),
                updated_at: Timestamp::from_datetime(updated_at),
            }),
            _ => None,
        };

        Ok(User {
            id: UserId::from_uuid(row.id),
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            phone_number: row.phone_number,
            address: row.address,
            role,
            avatar,
            is_login_allowed: row.is_login_allowed,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        let avatar = user.avatar.as_ref();

        sqlx::query(
            r#"
            INSERT INTO users (
                id, username, email, password_hash, phone_number, address, role,
                avatar_data, avatar_mime_type, avatar_updated_at, is_login_allowed,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.phone_number)
        .bind(&user.address)
        .bind(user.role.as_str())
        .bind(avatar.map(|a| a.data.as_slice()))
        .bind(avatar.map(|a| a.mime_type.as_str()))
        .bind(avatar.map(|a| *a.updated_at.as_datetime()))
        .bind(user.is_login_allowed)
        .bind(user.created_at.as_datetime())
        .bind(user.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "save"))?;

        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let avatar = user.avatar.as_ref();

        let result = sqlx::query(
            r#"
            UPDATE users SET
                username = $2,
                email = $3,
                password_hash = $4,
                phone_number = $5,
                address = $6,
                role = $7,
                avatar_data = $8,
                avatar_mime_type = $9,
                avatar_updated_at = $10,
                is_login_allowed = $11,
                updated_at = $12
            WHERE id = $1
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.phone_number)
        .bind(&user.address)
        .bind(user.role.as_str())
        .bind(avatar.map(|a| a.data.as_slice()))
        .bind(avatar.map(|a| a.mime_type.as_str()))
        .bind(avatar.map(|a| *a.updated_at.as_datetime()))
        .bind(user.is_login_allowed)
        .bind(user.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "update"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::UserNotFound,
                format!("User not found: {}", user.id),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, username, email, password_hash, phone_number, address, role,
                   avatar_data, avatar_mime_type, avatar_updated_at, is_login_allowed,
                   created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find user: {}", e)))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, username, email, password_hash, phone_number, address, role,
                   NULL::BYTEA AS avatar_data, NULL::VARCHAR AS avatar_mime_type,
                   NULL::TIMESTAMPTZ AS avatar_updated_at, is_login_allowed,
                   created_at, updated_at
            FROM users
            WHERE LOWER(email) = LOWER($1)
            "#,
        )
        .bind(email.trim())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find user by email: {}", e)))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, username, email, password_hash, phone_number, address, role,
                   NULL::BYTEA AS avatar_data, NULL::VARCHAR AS avatar_mime_type,
                   NULL::TIMESTAMPTZ AS avatar_updated_at, is_login_allowed,
                   created_at, updated_at
            FROM users
            WHERE LOWER(username) = LOWER($1)
            "#,
        )
        .bind(username.trim())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find user by username: {}", e)))?;

        row.map(User::try_from).transpose()
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to count users: {}", e)))?;

        Ok(count.max(0) as u64)
    }

    async fn search(&self, query: &UserPageQuery) -> Result<UserPage, DomainError> {
        let pattern = query.search.as_deref().map(like_pattern);

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM users
            WHERE $1::TEXT IS NULL
               OR LOWER(username) LIKE $1
               OR LOWER(email) LIKE $1
               OR LOWER(COALESCE(phone_number, '')) LIKE $1
               OR LOWER(COALESCE(address, '')) LIKE $1
            "#,
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to count users: {}", e)))?;

        let rows: Vec<UserRow> = sqlx::query_as(
            r#"
            SELECT id, username, email, password_hash, phone_number, address, role,
                   NULL::BYTEA AS avatar_data, NULL::VARCHAR AS avatar_mime_type,
                   NULL::TIMESTAMPTZ AS avatar_updated_at, is_login_allowed,
                   created_at, updated_at
            FROM users
            WHERE $1::TEXT IS NULL
               OR LOWER(username) LIKE $1
               OR LOWER(email) LIKE $1
               OR LOWER(COALESCE(phone_number, '')) LIKE $1
               OR LOWER(COALESCE(address, '')) LIKE $1
            ORDER BY username, id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(&pattern)
        .bind(i64::from(query.page_size))
        .bind(query.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to search users: {}", e)))?;

        let items = rows
            .into_iter()
            .map(User::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(UserPage {
            items,
            total_records: total.max(0) as u64,
        })
    }

    async fn list_all(&self) -> Result<Vec<User>, DomainError> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r#"
            SELECT id, username, email, password_hash, phone_number, address, role,
                   NULL::BYTEA AS avatar_data, NULL::VARCHAR AS avatar_mime_type,
                   NULL::TIMESTAMPTZ AS avatar_updated_at, is_login_allowed,
                   created_at, updated_at
            FROM users
            ORDER BY username, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list users: {}", e)))?;

        rows.into_iter().map(User::try_from).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════════

fn map_write_error(e: sqlx::Error, action: &str) -> DomainError {
    if let sqlx::Error::Database(db_err) = &e {
        match db_err.constraint() {
            Some(USERNAME_KEY) => {
                return DomainError::new(ErrorCode::DuplicateUsername, "Username already taken")
            }
            Some(EMAIL_KEY) => {
                return DomainError::new(ErrorCode::DuplicateEmail, "Email already registered")
            }
            _ => {}
        }
    }
    DomainError::database(format!("Failed to {} user: {}", action, e))
}

/// Builds a `LIKE` pattern from an already-lowercased term, escaping wildcards.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_wraps_and_escapes() {
        assert_eq!(like_pattern("ali"), "%ali%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }

    #[test]
    fn row_without_avatar_maps_to_user() {
        let now = Utc::now();
        let row = UserRow {
            id: Uuid::new_v4(),
            username: "alice".into(),
            email: "alice@example.com".into(),
            password_hash: "hash".into(),
            phone_number: None,
            address: Some("1 Main St".into()),
            role: "Admin".into(),
            avatar_data: None,
            avatar_mime_type: None,
            avatar_updated_at: None,
            is_login_allowed: true,
            created_at: now,
            updated_at: now,
        };

        let user = User::try_from(row).unwrap();
        assert_eq!(user.role, Role::Admin);
        assert!(user.avatar.is_none());
        assert_eq!(user.address.as_deref(), Some("1 Main St"));
    }

    #[test]
    fn unknown_role_is_a_database_error() {
        let now = Utc::now();
        let row = UserRow {
            id: Uuid::new_v4(),
            username: "bob".into(),
            email: "bob@example.com".into(),
            password_hash: "hash".into(),
            phone_number: None,
            address: None,
            role: "Superuser".into(),
            avatar_data: Some(vec![1, 2, 3]),
            avatar_mime_type: None,
            avatar_updated_at: Some(now),
            is_login_allowed: false,
            created_at: now,
            updated_at: now,
        };

        let err = User::try_from(row).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
