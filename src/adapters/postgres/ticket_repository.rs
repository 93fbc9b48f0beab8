//! PostgreSQL implementation of TicketRepository.
//!
//! Listings join `users` for the assignee's username; an assignee removed
//! from `users` leaves the ticket unassigned via `ON DELETE SET NULL`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, TicketId, Timestamp, UserId};
use crate::domain::ticket::Ticket;
use crate::ports::{AssigneeSummary, TicketListing, TicketRepository};

/// PostgreSQL implementation of the TicketRepository port.
pub struct PostgresTicketRepository {
    pool: PgPool,
}

impl PostgresTicketRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a ticket.
#[derive(Debug, sqlx::FromRow)]
struct TicketRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    status: String,
    priority: String,
    due_date: Option<DateTime<Utc>>,
    assigned_user_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TicketRow> for Ticket {
    fn from(row: TicketRow) -> Self {
        Ticket {
            id: TicketId::from_uuid(row.id),
            title: row.title,
            description: row.description,
            status: row.status,
            priority: row.priority,
            due_date: row.due_date.map(Timestamp::from_datetime),
            assigned_user_id: row.assigned_user_id.map(UserId::from_uuid),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        }
    }
}

/// Ticket row joined with the assignee's username.
#[derive(Debug, sqlx::FromRow)]
struct ListingRow {
    #[sqlx(flatten)]
    ticket: TicketRow,
    assignee_username: Option<String>,
}

impl From<ListingRow> for TicketListing {
    fn from(row: ListingRow) -> Self {
        let assignee = match (row.ticket.assigned_user_id, row.assignee_username) {
            (Some(id), Some(username)) => Some(AssigneeSummary {
                id: UserId::from_uuid(id),
                username,
            }),
            _ => None,
        };
        TicketListing {
            ticket: row.ticket.into(),
            assignee,
        }
    }
}

#[async_trait]
impl TicketRepository for PostgresTicketRepository {
    async fn save(&self, ticket: &Ticket) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO tickets (
                id, title, description, status, priority, due_date,
                assigned_user_id, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(ticket.id.as_uuid())
        .bind(&ticket.title)
        .bind(&ticket.description)
        .bind(&ticket.status)
        .bind(&ticket.priority)
        .bind(ticket.due_date.map(|d| *d.as_datetime()))
        .bind(ticket.assigned_user_id.map(|id| *id.as_uuid()))
        .bind(ticket.created_at.as_datetime())
        .bind(ticket.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to save ticket: {}", e)))?;

        Ok(())
    }

    async fn update(&self, ticket: &Ticket) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE tickets SET
                title = $2,
                description = $3,
                status = $4,
                priority = $5,
                due_date = $6,
                assigned_user_id = $7,
                updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(ticket.id.as_uuid())
        .bind(&ticket.title)
        .bind(&ticket.description)
        .bind(&ticket.status)
        .bind(&ticket.priority)
        .bind(ticket.due_date.map(|d| *d.as_datetime()))
        .bind(ticket.assigned_user_id.map(|id| *id.as_uuid()))
        .bind(ticket.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update ticket: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::TicketNotFound,
                format!("Ticket not found: {}", ticket.id),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>, DomainError> {
        let row: Option<TicketRow> = sqlx::query_as(
            r#"
            SELECT id, title, description, status, priority, due_date,
                   assigned_user_id, created_at, updated_at
            FROM tickets
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find ticket: {}", e)))?;

        Ok(row.map(Ticket::from))
    }

    async fn list_all(&self) -> Result<Vec<TicketListing>, DomainError> {
        let rows: Vec<ListingRow> = sqlx::query_as(
            r#"
            SELECT t.id, t.title, t.description, t.status, t.priority, t.due_date,
                   t.assigned_user_id, t.created_at, t.updated_at,
                   u.username AS assignee_username
            FROM tickets t
            LEFT JOIN users u ON u.id = t.assigned_user_id
            ORDER BY t.created_at DESC, t.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list tickets: {}", e)))?;

        Ok(rows.into_iter().map(TicketListing::from).collect())
    }

    async fn list_by_assignee(&self, username: &str) -> Result<Vec<TicketListing>, DomainError> {
        let rows: Vec<ListingRow> = sqlx::query_as(
            r#"
            SELECT t.id, t.title, t.description, t.status, t.priority, t.due_date,
                   t.assigned_user_id, t.created_at, t.updated_at,
                   u.username AS assignee_username
            FROM tickets t
            JOIN users u ON u.id = t.assigned_user_id
            WHERE LOWER(u.username) = LOWER($1)
            ORDER BY t.created_at DESC, t.id
            "#,
        )
        .bind(username.trim())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list tickets: {}", e)))?;

        Ok(rows.into_iter().map(TicketListing::from).collect())
    }

    async fn delete(&self, id: &TicketId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM tickets WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to delete ticket: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}
