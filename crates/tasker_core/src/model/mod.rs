//! Domain model for the task tracker.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//!
//! # Invariants
//! - Every task is identified by a stable storage-assigned `TaskId`.
//! - Task completion is monotonic: there is no transition back to not-done.

pub mod task;
