//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical record persisted in the `tasks` table.
//! - Define the insert-shape draft used by the create path.
//!
//! # Invariants
//! - `id` is storage-assigned, unique, and never reused for another task.
//! - `completed_at` is `None` until the task is first marked done; once set
//!   it stays set (re-marking only refreshes the instant).
//! - Rows are append-only plus the done/completed_at update; no operation
//!   deletes a task.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Stable storage-assigned identifier for a task.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = i64;

/// Canonical task record as persisted in storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Assigned by storage on insert, immutable afterwards.
    pub id: TaskId,
    /// Required but may be the empty string; immutable after creation.
    pub title: String,
    /// Defaults to the empty string; immutable after creation.
    pub description: String,
    /// Completion flag; transitions only from `false` to `true`.
    pub done: bool,
    /// Creation instant, local wall-clock, set once at insert.
    pub created_at: NaiveDateTime,
    /// Instant of the most recent done-transition, absent until first marked.
    pub completed_at: Option<NaiveDateTime>,
}

/// Draft record for the create path, before storage assigns an id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewTask {
    pub title: String,
    pub description: String,
}

impl NewTask {
    /// Creates a draft with the given title and an empty description.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
        }
    }

    /// Sets the description on the draft.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
