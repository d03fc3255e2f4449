//! Task use-case service.
//!
//! # Responsibility
//! - Provide stable entry points for adapters: add, list, find, complete.
//! - Implement the find-then-decide complete workflow on top of raw
//!   repository operations.
//!
//! # Invariants
//! - Completing an already-done task performs no mutation; only the first
//!   transition (or a direct `mark_done` call) writes to storage.
//! - Service APIs never bypass repository persistence contracts.

use crate::model::task::{NewTask, Task, TaskId};
use crate::repo::task_repo::{RepoError, RepoResult, TaskRepository};

/// Result of the complete workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The task transitioned to done; carries the updated row.
    Completed(Task),
    /// The task was already done; carries the row unchanged, no mutation.
    AlreadyDone(Task),
}

/// Use-case service wrapper over a task repository.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a task from command input and returns its assigned id.
    pub fn add_task(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> RepoResult<TaskId> {
        let draft = NewTask::new(title).with_description(description);
        self.repo.create_task(&draft)
    }

    /// Gets one task by id; `None` when the id does not exist.
    pub fn find_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        self.repo.get_task(id)
    }

    /// Lists every task in insertion order.
    pub fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        self.repo.list_tasks()
    }

    /// Two-step complete workflow.
    ///
    /// # Contract
    /// - Missing id: `RepoError::NotFound`, nothing written.
    /// - Already done: `AlreadyDone` with the row as-is, nothing written.
    /// - Otherwise: `mark_done` runs and `Completed` carries the fresh row
    ///   with `done = true` and a newly stamped `completed_at`.
    pub fn complete_task(&self, id: TaskId) -> RepoResult<CompletionOutcome> {
        let Some(task) = self.repo.get_task(id)? else {
            return Err(RepoError::NotFound(id));
        };

        if task.done {
            return Ok(CompletionOutcome::AlreadyDone(task));
        }

        let updated = self.repo.mark_done(id)?;
        Ok(CompletionOutcome::Completed(updated))
    }
}
