//! Core domain logic for the tasker task tracker.
//! This crate is the single source of truth for task lifecycle invariants.

pub mod db;
pub mod export;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use export::csv_export::{export_csv, ExportError, ExportResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{NewTask, Task, TaskId};
pub use repo::task_repo::{RepoError, RepoResult, SqliteTaskRepository, TaskRepository};
pub use service::task_service::{CompletionOutcome, TaskService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
