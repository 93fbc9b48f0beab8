//! External status vocabulary and the normalizer that maps onto it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ticket status as understood by the remote ticket service.
///
/// Internally tickets carry a free-form status string ("To Do", "In Progress",
/// ...). Only this fixed set ever leaves the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    #[default]
    Todo,
    InProgress,
    Resolved,
    Testing,
    Closed,
    Done,
}

impl SyncStatus {
    /// All values, in workflow order.
    pub const ALL: [SyncStatus; 6] = [
        SyncStatus::Todo,
        SyncStatus::InProgress,
        SyncStatus::Resolved,
        SyncStatus::Testing,
        SyncStatus::Closed,
        SyncStatus::Done,
    ];

    /// Maps an internal status string onto the external vocabulary.
    ///
    /// Casing, whitespace, underscores and hyphens are ignored, so
    /// "To Do", "to_do" and "TODO" all collapse to `Todo`. Anything
    /// unrecognised becomes `Todo`.
    pub fn normalize(raw: &str) -> Self {
        let key: String = raw
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "inprogress" => SyncStatus::InProgress,
            "resolved" => SyncStatus::Resolved,
            "testing" => SyncStatus::Testing,
            "closed" => SyncStatus::Closed,
            "done" => SyncStatus::Done,
            _ => SyncStatus::Todo,
        }
    }

    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncStatus::Todo => "todo",
            SyncStatus::InProgress => "in_progress",
            SyncStatus::Resolved => "resolved",
            SyncStatus::Testing => "testing",
            SyncStatus::Closed => "closed",
            SyncStatus::Done => "done",
        }
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
