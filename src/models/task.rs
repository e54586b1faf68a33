use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task record. Every operation on tasks is scoped by `user_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Storage-assigned ID
    pub id: u64,
    /// Owning user ID
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    /// Optional due date
    pub deadline: Option<DateTime<Utc>>,
    pub completed: bool,
    /// Creation time, assigned by storage
    pub created_at: DateTime<Utc>,
}

/// Fields for a new task. The owner, id, creation time, and initial
/// completed flag are assigned by the store.
#[derive(Debug, Clone)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub deadline: Option<DateTime<Utc>>,
}

/// Field replacement for an update. `None` leaves the stored value
/// unchanged; the set of mutable fields is fixed to these five.
#[derive(Debug, Clone, Default)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub completed: Option<bool>,
}
