//! Ticket aggregate.

use crate::domain::foundation::{TicketId, Timestamp, UserId, ValidationError};

pub const DEFAULT_STATUS: &str = "To Do";
pub const DEFAULT_PRIORITY: &str = "Medium";

const TITLE_MIN: usize = 3;
const TITLE_MAX: usize = 100;
const DESCRIPTION_MAX: usize = 500;
const STATUS_MAX: usize = 20;
const PRIORITY_MAX: usize = 20;

/// A unit of work tracked by the desk.
///
/// `status` is the internal free-form string ("To Do", "In Progress", ...);
/// it is only mapped onto the fixed external vocabulary when a sync event
/// is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub id: TicketId,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub due_date: Option<Timestamp>,
    pub assigned_user_id: Option<UserId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for creating a ticket. Missing status and priority get defaults.
#[derive(Debug, Clone, Default)]
pub struct NewTicket {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<Timestamp>,
    pub assigned_user_id: Option<UserId>,
}

/// Full replacement of a ticket's editable fields.
#[derive(Debug, Clone, Default)]
pub struct TicketChanges {
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub due_date: Option<Timestamp>,
    pub assigned_user_id: Option<UserId>,
}

impl Ticket {
    /// Validates input and builds a new ticket with a fresh id.
    pub fn create(input: NewTicket) -> Result<Self, ValidationError> {
        let title = validate_title(&input.title)?;
        let description = validate_description(input.description)?;
        let status = validate_status(input.status.as_deref().unwrap_or(DEFAULT_STATUS))?;
        let priority = validate_priority(input.priority.as_deref().unwrap_or(DEFAULT_PRIORITY))?;

        let now = Timestamp::now();
        Ok(Self {
            id: TicketId::new(),
            title,
            description,
            status,
            priority,
            due_date: input.due_date,
            assigned_user_id: input.assigned_user_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replaces all editable fields.
    pub fn apply(&mut self, changes: TicketChanges) -> Result<(), ValidationError> {
        let title = validate_title(&changes.title)?;
        let description = validate_description(changes.description)?;
        let status = validate_status(&changes.status)?;
        let priority = validate_priority(&changes.priority)?;

        self.title = title;
        self.description = description;
        self.status = status;
        self.priority = priority;
        self.due_date = changes.due_date;
        self.assigned_user_id = changes.assigned_user_id;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Moves the ticket to another internal status.
    pub fn move_to(&mut self, status: &str) -> Result<(), ValidationError> {
        self.status = validate_status(status)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

fn validate_title(title: &str) -> Result<String, ValidationError> {
    ValidationError::check_length("title", title, TITLE_MIN, TITLE_MAX)?;
    Ok(title.trim().to_string())
}

fn validate_description(description: Option<String>) -> Result<Option<String>, ValidationError> {
    match description {
        Some(d) if !d.trim().is_empty() => {
            ValidationError::check_length("description", &d, 0, DESCRIPTION_MAX)?;
            Ok(Some(d.trim().to_string()))
        }
        _ => Ok(None),
    }
}

fn validate_status(status: &str) -> Result<String, ValidationError> {
    ValidationError::check_length("status", status, 1, STATUS_MAX)?;
    Ok(status.trim().to_string())
}

fn validate_priority(priority: &str) -> Result<String, ValidationError> {
    ValidationError::check_length("priority", priority, 1, PRIORITY_MAX)?;
    Ok(priority.trim().to_string())
}
