//! Repository layer abstraction and persistence implementation.
//!
//! # Responsibility
//! - Define the data access contract the commands are written against.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - The repository is the sole mediator of reads/writes to `tasks`.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod task_repo;
